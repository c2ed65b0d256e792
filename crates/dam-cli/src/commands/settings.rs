//! Per-user storage settings CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use dam_core::config::AppConfig;
use dam_core::error::AppError;
use dam_entity::settings::UserSetting;
use dam_service::RequestContext;
use dam_service::settings::{CreateUserSettingRequest, UserSettingService};

use crate::output::{self, OutputFormat};

/// Arguments for settings commands
#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings subcommand
    #[command(subcommand)]
    pub command: SettingsCommand,
}

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the user's storage settings (credentials are never printed)
    Show,
    /// Register the user's storage settings
    Create {
        /// Storage vendor
        #[arg(long, default_value = "amazon_s3")]
        vendor: String,
        /// Bucket name
        #[arg(long)]
        bucket: String,
        /// Bucket region
        #[arg(long)]
        region: String,
        /// Access key id
        #[arg(long, env = "DAM_ACCESS_KEY_ID")]
        access_key_id: String,
        /// Secret access key
        #[arg(long, env = "DAM_SECRET_ACCESS_KEY", hide_env_values = true)]
        secret_access_key: String,
    },
}

/// Settings as printed: the credential pair is left out.
#[derive(Debug, Serialize)]
struct SettingView<'a> {
    id: String,
    user_id: String,
    storage_vendor: &'static str,
    bucket_name: &'a str,
    region: &'a str,
}

fn print_setting(setting: &UserSetting, format: OutputFormat) {
    let view = SettingView {
        id: setting.id.to_string(),
        user_id: setting.user_id.to_string(),
        storage_vendor: setting.storage_vendor.as_str(),
        bucket_name: &setting.storage_informations.bucket_name,
        region: &setting.storage_informations.region,
    };
    output::print_record(
        &view,
        &[
            ("ID", view.id.clone()),
            ("User", view.user_id.clone()),
            ("Vendor", view.storage_vendor.to_string()),
            ("Bucket", view.bucket_name.to_string()),
            ("Region", view.region.to_string()),
        ],
        format,
    );
}

/// Execute settings commands
pub async fn execute(
    args: &SettingsArgs,
    config: &AppConfig,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let repos = super::open_repositories(config).await?;
    let settings = UserSettingService::new(repos.settings.clone());

    match &args.command {
        SettingsCommand::Show => {
            let setting = settings.get_setting(ctx).await?;
            print_setting(&setting, format);
        }
        SettingsCommand::Create {
            vendor,
            bucket,
            region,
            access_key_id,
            secret_access_key,
        } => {
            let setting = settings
                .create_setting(
                    ctx,
                    CreateUserSettingRequest {
                        storage_vendor: vendor.clone(),
                        bucket_name: bucket.clone(),
                        region: region.clone(),
                        access_key_id: access_key_id.clone(),
                        secret_access_key: secret_access_key.clone(),
                    },
                )
                .await?;
            output::print_success("Storage settings saved.");
            print_setting(&setting, format);
        }
    }

    Ok(())
}
