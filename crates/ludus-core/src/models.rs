//! Request and response payloads used by the CLI commands

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LudusResult;

/// `{"result": "..."}` returned by most mutating endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericResult {
    #[serde(default)]
    pub result: String,
}

impl GenericResult {
    pub fn from_slice(body: &[u8]) -> LudusResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmObject {
    #[serde(rename = "ID", default)]
    pub id: i32,
    #[serde(rename = "proxmoxID", default)]
    pub proxmox_id: i32,
    #[serde(rename = "rangeNumber", default)]
    pub range_number: i32,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "poweredOn", default)]
    pub powered_on: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeObject {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "rangeNumber")]
    pub range_number: i32,
    #[serde(rename = "lastDeployment")]
    pub last_deployment: DateTime<Utc>,
    #[serde(rename = "numberOfVMs", default)]
    pub number_of_vms: i32,
    #[serde(rename = "testingEnabled", default)]
    pub testing_enabled: bool,
    #[serde(rename = "allowedIPs", default)]
    pub allowed_ips: Vec<String>,
    #[serde(rename = "allowedDomains", default)]
    pub allowed_domains: Vec<String>,
    #[serde(rename = "VMs", default)]
    pub vms: Vec<VmObject>,
    #[serde(rename = "rangeState", default)]
    pub range_state: String,
}

impl RangeObject {
    /// Range network in CIDR form, `10.<rangeNumber>.0.0/16`
    pub fn network(&self) -> String {
        format!("10.{}.0.0/16", self.range_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserObject {
    pub name: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "dateCreated")]
    pub date_created: DateTime<Utc>,
    #[serde(rename = "dateLastActive")]
    pub date_last_active: DateTime<Utc>,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    #[serde(rename = "proxmoxUsername", default)]
    pub proxmox_username: String,
}

/// Body for `/range/poweron` and `/range/poweroff`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerBody {
    pub machines: Vec<String>,
}

impl PowerBody {
    /// Split a comma separated list of VM names (or `all`)
    pub fn from_names(names: &str) -> Self {
        Self {
            machines: names.split(',').map(|n| n.trim().to_string()).collect(),
        }
    }
}

/// Body for `/range/deploy`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployBody {
    pub tags: String,
    pub force: bool,
    pub verbose: bool,
    pub only_roles: Vec<String>,
    pub limit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_object_from_server_json() {
        let body = r#"{
            "userID": "JD",
            "rangeNumber": 2,
            "lastDeployment": "2024-01-15T10:30:00Z",
            "numberOfVMs": 1,
            "testingEnabled": false,
            "allowedIPs": [],
            "allowedDomains": [],
            "VMs": [{"ID": 1, "proxmoxID": 104, "rangeNumber": 2, "name": "JD-dc01", "poweredOn": true, "ip": "10.2.10.11"}],
            "rangeState": "SUCCESS"
        }"#;
        let range: RangeObject = serde_json::from_str(body).unwrap();
        assert_eq!(range.user_id, "JD");
        assert_eq!(range.network(), "10.2.0.0/16");
        assert_eq!(range.vms.len(), 1);
        assert!(range.vms[0].powered_on);
        assert_eq!(range.vms[0].proxmox_id, 104);
    }

    #[test]
    fn test_power_body_splits_names() {
        assert_eq!(PowerBody::from_names("all").machines, vec!["all"]);
        assert_eq!(
            PowerBody::from_names("JD-dc01,JD-win10").machines,
            vec!["JD-dc01", "JD-win10"]
        );
    }

    #[test]
    fn test_generic_result_parse() {
        let parsed = GenericResult::from_slice(br#"{"result":"Range deploy started"}"#).unwrap();
        assert_eq!(parsed.result, "Range deploy started");
        assert!(GenericResult::from_slice(b"not json").is_err());
    }

    #[test]
    fn test_deploy_body_field_names() {
        let body = DeployBody {
            only_roles: vec!["a".into()],
            ..Default::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("only_roles").is_some());
        assert_eq!(json["force"], false);
    }
}
