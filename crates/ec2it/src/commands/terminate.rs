//! Terminate command

use anyhow::Result;
use ec2it_aws::api::Ec2Api;
use ec2it_aws::resolver;

use crate::cli::TargetArgs;
use crate::output;

pub async fn run(args: TargetArgs, api: &dyn Ec2Api) -> Result<()> {
    let instance =
        resolver::fetch_one_instance(api, args.instance_id.as_deref(), args.name.as_deref())
            .await?;

    api.terminate_instances(&instance.id, args.dry_run).await?;
    output::success(&format!("Terminated instance {}", instance.id));

    Ok(())
}
