//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// ec2it - EC2 instance and AMI lifecycle with tag conventions
#[derive(Parser, Debug)]
#[command(name = "ec2it")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to ec2it.toml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Defaults to `list` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List instances
    List(ListArgs),

    /// Start an instance
    Start(TargetArgs),

    /// Stop an instance
    Stop(TargetArgs),

    /// Run an instance from an AMI
    Launch(LaunchArgs),

    /// Terminate an instance
    Terminate(TargetArgs),

    /// List AMIs
    ListAmi(ListArgs),

    /// Create an AMI from an instance
    CreateAmi(TargetArgs),
}

/// Listing filters shared by `list` and `list-ami`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only resources with this Role tag
    #[arg(short, long)]
    pub role: Option<String>,

    /// Only resources with this Group tag
    #[arg(short, long)]
    pub group: Option<String>,
}

/// Instance selection shared by `start`, `stop`, `terminate`, and `create-ami`
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Instance id
    #[arg(short = 'i', long)]
    pub instance_id: Option<String>,

    /// Instance Name tag
    #[arg(short, long)]
    pub name: Option<String>,

    /// Validate the request without executing it
    #[arg(long)]
    pub dry_run: bool,
}

// Launch command
#[derive(Args, Debug)]
pub struct LaunchArgs {
    /// AMI id to launch from
    #[arg(short = 'i', long, value_name = "AMI_ID")]
    pub ami_id: String,

    /// Name tag for the new instance
    #[arg(short, long)]
    pub name: String,

    /// Instance type (default from config)
    #[arg(short = 't', long)]
    pub instance_type: Option<String>,

    /// Availability zone (default from config)
    #[arg(long, visible_alias = "az")]
    pub availability_zone: Option<String>,

    /// Security group ids, merged with the configured default
    #[arg(long = "security-groups", visible_alias = "sg")]
    pub security_groups: Vec<String>,

    /// Validate the request without executing it
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_defaults_to_list() {
        let cli = Cli::try_parse_from(["ec2it"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn list_accepts_role_and_group_shorthands() {
        let cli = Cli::try_parse_from(["ec2it", "list", "-r", "web", "-g", "prod"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.role.as_deref(), Some("web"));
                assert_eq!(args.group.as_deref(), Some("prod"));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn start_accepts_id_or_name_shorthands() {
        let cli = Cli::try_parse_from(["ec2it", "start", "-n", "web-1", "--dry-run"]).unwrap();
        match cli.command {
            Some(Commands::Start(args)) => {
                assert_eq!(args.name.as_deref(), Some("web-1"));
                assert_eq!(args.instance_id, None);
                assert!(args.dry_run);
            }
            other => panic!("expected start, got {other:?}"),
        }
    }

    #[test]
    fn launch_requires_ami_id_and_name() {
        assert!(Cli::try_parse_from(["ec2it", "launch", "-i", "ami-0aaa"]).is_err());
        assert!(Cli::try_parse_from(["ec2it", "launch", "-n", "web-1"]).is_err());
        assert!(Cli::try_parse_from(["ec2it", "launch", "-i", "ami-0aaa", "-n", "web-1"]).is_ok());
    }

    #[test]
    fn launch_aliases_parse() {
        let cli = Cli::try_parse_from([
            "ec2it", "launch", "-i", "ami-0aaa", "-n", "web-1", "--az", "us-east-1a", "--sg",
            "sg-0one", "--sg", "sg-0two",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Launch(args)) => {
                assert_eq!(args.availability_zone.as_deref(), Some("us-east-1a"));
                assert_eq!(args.security_groups, vec!["sg-0one", "sg-0two"]);
            }
            other => panic!("expected launch, got {other:?}"),
        }
    }

    #[test]
    fn ami_subcommands_use_kebab_case_names() {
        assert!(matches!(
            Cli::try_parse_from(["ec2it", "list-ami"]).unwrap().command,
            Some(Commands::ListAmi(_))
        ));
        assert!(matches!(
            Cli::try_parse_from(["ec2it", "create-ami", "-i", "i-0aaa"])
                .unwrap()
                .command,
            Some(Commands::CreateAmi(_))
        ));
    }

    #[test]
    fn global_config_flag_parses_anywhere() {
        let cli = Cli::try_parse_from(["ec2it", "list", "--config", "custom.toml"]).unwrap();
        assert_eq!(cli.config.as_deref().map(|p| p.as_str()), Some("custom.toml"));
    }
}
