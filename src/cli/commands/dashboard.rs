use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::{config, utils, OutputFormat};
use crate::client::http::{decode_list, decode_record, handle_response, response_message};
use crate::client::ApiClient;

#[derive(Subcommand)]
pub enum DashboardCommands {
    #[command(about = "Headline totals: revenue, orders, clients, products")]
    Summary,

    #[command(about = "Products ranked by units sold")]
    BestSellers,

    #[command(about = "Products ranked by review rating")]
    TopRated,

    #[command(about = "Discount wheel controls")]
    Wheel {
        #[command(subcommand)]
        cmd: WheelCommands,
    },
}

#[derive(Subcommand)]
pub enum WheelCommands {
    #[command(about = "Show the current wheel state")]
    Status,
    #[command(about = "Enable the discount wheel")]
    On,
    #[command(about = "Disable the discount wheel")]
    Off,
}

pub async fn handle(cmd: DashboardCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    let api = ApiClient::new(cfg.server_url);

    match cmd {
        DashboardCommands::Summary => {
            let body = get(&api, "/dashboard/summary").await?;
            let data = decode_record(body);

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
                OutputFormat::Text => {
                    println!("Revenue:  {}", field(&data, "revenue"));
                    println!("Orders:   {}", field(&data, "orders"));
                    println!("Clients:  {}", field(&data, "clients"));
                    println!("Products: {}", field(&data, "products"));
                }
            }
            Ok(())
        }

        DashboardCommands::BestSellers => {
            let body = get(&api, "/dashboard/bestSellers").await?;
            let entries: Vec<Value> = decode_list(body);

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Text => {
                    if entries.is_empty() {
                        println!("No sales yet");
                    }
                    for entry in &entries {
                        println!(
                            "{}  sold {}",
                            entry.get("name").and_then(Value::as_str).unwrap_or("?"),
                            field(entry, "unitsSold"),
                        );
                    }
                }
            }
            Ok(())
        }

        DashboardCommands::TopRated => {
            let body = get(&api, "/dashboard/topRated").await?;
            let entries: Vec<Value> = decode_list(body);

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Text => {
                    if entries.is_empty() {
                        println!("No rated products yet");
                    }
                    for entry in &entries {
                        println!(
                            "{}  rating {}",
                            entry.get("name").and_then(Value::as_str).unwrap_or("?"),
                            field(entry, "rating"),
                        );
                    }
                }
            }
            Ok(())
        }

        DashboardCommands::Wheel { cmd } => {
            match cmd {
                WheelCommands::Status => {
                    let body = get(&api, "/discounts/wheel").await?;
                    let enabled = decode_record(body)
                        .get("enabled")
                        .and_then(Value::as_bool)
                        .unwrap_or(false);
                    utils::output_success(
                        &output_format,
                        if enabled { "Discount wheel is enabled" } else { "Discount wheel is disabled" },
                        Some(json!({ "enabled": enabled })),
                    )
                }
                WheelCommands::On => set_wheel(&api, true, &output_format).await,
                WheelCommands::Off => set_wheel(&api, false, &output_format).await,
            }
        }
    }
}

async fn get(api: &ApiClient, path: &str) -> anyhow::Result<Value> {
    let response = api.http().get(api.url(path)).send().await?;
    handle_response(response).await.map_err(|e| anyhow::anyhow!("{}", e))
}

async fn set_wheel(api: &ApiClient, enabled: bool, output_format: &OutputFormat) -> anyhow::Result<()> {
    let response = api
        .http()
        .put(api.url("/discounts/wheel"))
        .json(&json!({ "enabled": enabled }))
        .send()
        .await?;
    let body = handle_response(response).await.map_err(|e| anyhow::anyhow!("{}", e))?;

    let message = response_message(&body)
        .unwrap_or_else(|| if enabled { "Discount wheel enabled".into() } else { "Discount wheel disabled".into() });
    utils::output_success(output_format, &message, None)
}

fn field(value: &Value, key: &str) -> String {
    value.get(key).map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
