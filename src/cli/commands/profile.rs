use clap::Subcommand;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::{config, utils, OutputFormat};
use crate::client::profile::{
    fetch_user_profile, initials, member_since, ProfileField, ProfileForm,
};
use crate::client::session::TokenSession;
use crate::client::ApiClient;

#[derive(Subcommand)]
pub enum ProfileCommands {
    #[command(about = "Show the logged-in client's profile")]
    Show,

    #[command(about = "Update personal information and/or the profile picture")]
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long, help = "Path to a new profile picture")]
        picture: Option<PathBuf>,
    },
}

pub async fn handle(cmd: ProfileCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    let api = ApiClient::new(cfg.server_url.clone());
    let session = Arc::new(TokenSession::new(cfg.token.clone()));

    match cmd {
        ProfileCommands::Show => {
            let user = fetch_user_profile(&api, session.as_ref())
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&user)?);
                }
                OutputFormat::Text => {
                    println!("{} ({})", user.name, initials(&user.name));
                    println!("Email:   {}", user.email);
                    println!("Phone:   {}", user.phone.as_deref().unwrap_or("-"));
                    println!("Address: {}", user.address.as_deref().unwrap_or("-"));
                    println!("Member since: {}", member_since(user.created_at.as_deref()));
                }
            }
            Ok(())
        }

        ProfileCommands::Update { name, phone, address, picture } => {
            let user = fetch_user_profile(&api, session.as_ref())
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            let mut form = ProfileForm::new(api, session);
            form.initialize(&user);

            // Route edits through the input transforms, like the form does
            if let Some(v) = name {
                form.handle_input_change(ProfileField::FullName, &v);
            }
            if let Some(v) = phone {
                form.handle_input_change(ProfileField::Phone, &v);
            }
            if let Some(v) = address {
                form.handle_input_change(ProfileField::Address, &v);
            }
            if let Some(path) = picture {
                form.select_image(&path).await;
                if let Some(error) = form.errors.get("profilePicture") {
                    utils::output_error(&output_format, error, None)?;
                    std::process::exit(1);
                }
            }

            let outcome = form.submit().await;
            if outcome.success {
                utils::output_success(&output_format, &outcome.message, outcome.data)?;
                Ok(())
            } else {
                let errors = if form.errors.is_empty() { None } else { Some(&form.errors) };
                utils::output_error(&output_format, &outcome.message, errors)?;
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn profile_json_round_trips_for_output() {
        // The JSON output path serializes the wire model directly
        let value = json!({ "id": "u1", "name": "Ana", "email": "ana@example.com" });
        let user: crate::client::models::UserProfile = serde_json::from_value(value).unwrap();
        assert_eq!(user.name, "Ana");
    }
}
