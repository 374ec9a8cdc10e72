//! Stop command

use anyhow::Result;
use ec2it_aws::api::Ec2Api;
use ec2it_aws::resolver;

use crate::cli::TargetArgs;
use crate::output;

pub async fn run(args: TargetArgs, api: &dyn Ec2Api) -> Result<()> {
    let instance =
        resolver::fetch_one_instance(api, args.instance_id.as_deref(), args.name.as_deref())
            .await?;

    api.stop_instances(&instance.id, args.dry_run).await?;
    output::success(&format!("Stopped instance {}", instance.id));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec2it_core::types::Instance;
    use ec2it_aws::mock::MockEc2;

    #[tokio::test]
    async fn stops_the_instance_resolved_by_id() {
        let mock = MockEc2::with_instances(vec![Instance {
            id: "i-0aaa".into(),
            status: "running".into(),
            ..Default::default()
        }]);

        run(
            TargetArgs {
                instance_id: Some("i-0aaa".into()),
                ..Default::default()
            },
            &mock,
        )
        .await
        .unwrap();

        assert_eq!(mock.lifecycle_calls(), vec![("stop", "i-0aaa".into(), false)]);
    }
}
