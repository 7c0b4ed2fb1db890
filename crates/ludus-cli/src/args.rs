//! CLI argument definitions using clap
//!
//! - ludus version                    # Client and server version
//! - ludus apikey                     # Store an API key for --url
//! - ludus range list [all]           # Range status
//! - ludus range config set -f f.yml  # Upload a range config
//! - ludus power on -n all            # Power VMs on

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use ludus_core::SettingsOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ludus")]
#[command(about = "An application to control Ludus")]
#[command(
    long_about = r#"Ludus is a CLI application to control a Ludus server.
This application can manage users as well as ranges.

Ludus is a project to enable teams to quickly and
safely deploy test environments (ranges) to test tools and
techniques against representative virtual machines."#
)]
#[command(version)]
pub struct Cli {
    /// Config file (default is $HOME/.config/ludus/config.yml)
    #[arg(long, global = true, env = "LUDUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose client output
    #[arg(
        long,
        global = true,
        env = "LUDUS_VERBOSE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub verbose: Option<bool>,

    /// Server host URL
    #[arg(long, global = true, env = "LUDUS_URL")]
    pub url: Option<String>,

    /// HTTP(S) proxy URL
    #[arg(long, global = true, env = "LUDUS_PROXY")]
    pub proxy: Option<String>,

    /// Verify the HTTPS certificate of the Ludus server
    #[arg(
        long,
        global = true,
        env = "LUDUS_VERIFY",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub verify: Option<bool>,

    /// Format output as json
    #[arg(
        long,
        global = true,
        env = "LUDUS_JSON",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub json: Option<bool>,

    /// A user ID to impersonate (only available to admins)
    #[arg(long, global = true, env = "LUDUS_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings given on the command line or via `LUDUS_*` variables
    ///
    /// An absent flag leaves the config file value alone; `--verify=false`
    /// or `LUDUS_VERIFY=false` turns it off.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            url: self.url.clone(),
            proxy: self.proxy.clone(),
            verify: self.verify,
            json: self.json,
            verbose: self.verbose,
            user: self.user.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints the version of this ludus binary and the server
    Version,

    /// Store your Ludus API key for the current URL
    Apikey,

    /// Control the power state of range VMs
    Power {
        #[command(subcommand)]
        action: PowerAction,
    },

    /// Perform actions on your range
    Range {
        #[command(subcommand)]
        action: RangeAction,
    },

    /// Perform actions related to users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PowerAction {
    /// Power on range VMs
    On {
        /// A VM name (JD-win10-21h2-enterprise-x64-1) or names separated by commas or 'all'
        #[arg(short = 'n', long)]
        name: String,
    },
    /// Power off range VMs
    Off {
        /// A VM name (JD-win10-21h2-enterprise-x64-1) or names separated by commas or 'all'
        #[arg(short = 'n', long)]
        name: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum RangeAction {
    /// List details about your range
    #[command(visible_aliases = ["status", "get"])]
    List {
        /// Pass 'all' to list every range (admins only)
        #[arg(value_parser = ["all"])]
        scope: Option<String>,
    },

    /// Get or set the range configuration
    Config {
        #[command(subcommand)]
        action: RangeConfigAction,
    },

    /// Deploy a range, running specific tags if specified
    #[command(visible_alias = "build")]
    Deploy {
        /// The ansible tags to run for this deploy (default: all)
        #[arg(short = 't', long, default_value = "")]
        tags: String,

        /// Force the deployment if testing is enabled
        #[arg(long)]
        force: bool,

        /// Enable verbose output from ansible during the deploy
        #[arg(short = 'v', long = "verbose-ansible")]
        verbose_ansible: bool,

        /// Limit the user defined roles to be run to this comma separated list of roles
        #[arg(long = "only-roles", default_value = "")]
        only_roles: String,

        /// Limit the deploy to VMs that match the specified pattern
        #[arg(short = 'l', long, default_value = "")]
        limit: String,
    },

    /// Get the latest deploy logs from your range
    Logs {
        /// Number of lines to return from the end of the log
        #[arg(short = 't', long)]
        tail: Option<u32>,
    },

    /// Kill the ansible process deploying a range
    Abort,

    /// Destroy all VMs in your range
    Rm {
        /// Skip the confirmation prompt
        #[arg(long)]
        no_prompt: bool,
    },

    /// Get a zip of RDP configuration files for all Windows hosts in a range
    Rdp {
        /// The output file path
        #[arg(short = 'o', long, default_value = "rdp.zip")]
        output: PathBuf,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum RangeConfigAction {
    /// Get the current range configuration
    Get,
    /// Set the configuration for a range
    Set {
        /// The range configuration file
        #[arg(short = 'f', long)]
        file: PathBuf,

        /// Force the configuration to be updated, even with testing enabled
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum UsersAction {
    /// List user details
    List {
        /// Pass 'all' to list every user (admins only)
        #[arg(value_parser = ["all"])]
        scope: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ludus", "range", "list", "--url", "https://10.0.0.1:8080", "--json",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://10.0.0.1:8080"));
        assert_eq!(cli.json, Some(true));
        assert!(matches!(
            cli.command,
            Commands::Range {
                action: RangeAction::List { scope: None }
            }
        ));
    }

    #[test]
    fn test_range_list_alias_and_all() {
        let cli = Cli::try_parse_from(["ludus", "range", "status", "all"]).unwrap();
        match cli.command {
            Commands::Range {
                action: RangeAction::List { scope },
            } => assert_eq!(scope.as_deref(), Some("all")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_range_list_rejects_unknown_scope() {
        assert!(Cli::try_parse_from(["ludus", "range", "list", "everything"]).is_err());
    }

    #[test]
    fn test_power_requires_name() {
        assert!(Cli::try_parse_from(["ludus", "power", "on"]).is_err());
        let cli = Cli::try_parse_from(["ludus", "power", "off", "-n", "all"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Power {
                action: PowerAction::Off { .. }
            }
        ));
    }

    #[test]
    fn test_deploy_short_flags() {
        let cli = Cli::try_parse_from([
            "ludus", "range", "deploy", "-t", "dns", "-v", "-l", "localhost,JD-dc01",
        ])
        .unwrap();
        match cli.command {
            Commands::Range {
                action:
                    RangeAction::Deploy {
                        tags,
                        verbose_ansible,
                        limit,
                        force,
                        ..
                    },
            } => {
                assert_eq!(tags, "dns");
                assert!(verbose_ansible);
                assert!(!force);
                assert_eq!(limit, "localhost,JD-dc01");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_config_set_requires_file() {
        assert!(Cli::try_parse_from(["ludus", "range", "config", "set"]).is_err());
        let cli =
            Cli::try_parse_from(["ludus", "range", "config", "set", "-f", "range.yml", "--force"])
                .unwrap();
        match cli.command {
            Commands::Range {
                action:
                    RangeAction::Config {
                        action: RangeConfigAction::Set { file, force },
                    },
            } => {
                assert_eq!(file, PathBuf::from("range.yml"));
                assert!(force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_overrides_leave_unset_flags_empty() {
        let cli = Cli::try_parse_from(["ludus", "--user", "ALICE", "version"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.user.as_deref(), Some("ALICE"));
        assert_eq!(overrides.verify, None);
        assert_eq!(overrides.json, None);
    }

    #[test]
    fn test_false_flag_overrides_config_file() {
        let cli = Cli::try_parse_from(["ludus", "--verify=false", "version"]).unwrap();
        let file = SettingsOverrides {
            verify: Some(true),
            ..Default::default()
        };
        let settings = ludus_core::ClientSettings::from_overrides(cli.overrides().or(file));
        assert!(!settings.verify);
    }

    #[test]
    fn test_bare_flag_is_true() {
        let cli = Cli::try_parse_from(["ludus", "--verify", "range", "list"]).unwrap();
        assert_eq!(cli.verify, Some(true));
        assert!(Cli::try_parse_from(["ludus", "--json=maybe", "version"]).is_err());
    }

    #[test]
    fn test_logs_tail_short_flag() {
        let cli = Cli::try_parse_from(["ludus", "range", "logs", "-t", "50"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Range {
                action: RangeAction::Logs { tail: Some(50) }
            }
        ));
    }
}
