//! List command

use anyhow::Result;
use ec2it_aws::api::Ec2Api;
use ec2it_aws::resolver;
use ec2it_core::types::Instance;

use crate::cli::ListArgs;

pub async fn run(args: ListArgs, api: &dyn Ec2Api) -> Result<()> {
    let instances =
        resolver::fetch_instances(api, args.role.as_deref(), args.group.as_deref()).await?;

    for instance in &instances {
        println!("{}", format_row(instance));
    }

    Ok(())
}

/// One tab-separated row: id, name:status(role){group}, private ip, public ip
fn format_row(instance: &Instance) -> String {
    format!(
        "{}\t{}:{}({}){{{}}}\t{}\t{}",
        instance.id,
        instance.name().unwrap_or(""),
        instance.status,
        instance.role().unwrap_or(""),
        instance.group().unwrap_or(""),
        instance.private_ip.as_deref().unwrap_or(""),
        instance.public_ip.as_deref().unwrap_or(""),
    )
}
