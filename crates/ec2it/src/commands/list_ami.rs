//! List-AMI command

use anyhow::Result;
use ec2it_aws::api::Ec2Api;
use ec2it_aws::resolver;
use ec2it_core::types::Image;

use crate::cli::ListArgs;

pub async fn run(args: ListArgs, api: &dyn Ec2Api) -> Result<()> {
    let images = resolver::fetch_images(api, args.role.as_deref(), args.group.as_deref()).await?;

    for image in &images {
        println!("{}", format_row(image));
    }

    Ok(())
}

/// One tab-separated row: id, name:status(role){group}, creation date
fn format_row(image: &Image) -> String {
    format!(
        "{}\t{}:{}({}){{{}}}\t{}",
        image.id,
        image.display_name(),
        image.status,
        image.role().unwrap_or(""),
        image.group().unwrap_or(""),
        image.creation_date.as_deref().unwrap_or(""),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec2it_core::types::Tag;

    #[test]
    fn row_prefers_the_name_tag() {
        let image = Image {
            id: "ami-0aaa".into(),
            image_name: "web-1.20240101_0000".into(),
            status: "available".into(),
            creation_date: Some("2024-01-01T00:00:00.000Z".into()),
            tags: vec![
                Tag::new("Name", "web-1"),
                Tag::new("Role", "web"),
                Tag::new("Group", "prod"),
            ],
            block_devices: Vec::new(),
        };

        assert_eq!(
            format_row(&image),
            "ami-0aaa\tweb-1:available(web){prod}\t2024-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn row_falls_back_to_the_ami_name_field() {
        let image = Image {
            id: "ami-0bbb".into(),
            image_name: "db-1.20240101_0000".into(),
            status: "pending".into(),
            ..Default::default()
        };

        assert_eq!(format_row(&image), "ami-0bbb\tdb-1.20240101_0000:pending(){}\t");
    }
}
