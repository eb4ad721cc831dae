use clap::Subcommand;
use std::path::PathBuf;

use crate::cli::{config, utils, OutputFormat};
use crate::client::products::ProductAdmin;
use crate::client::{load_image_file, ApiClient, ClientError};

#[derive(Subcommand)]
pub enum ProductCommands {
    #[command(about = "List the product catalog")]
    List,

    #[command(about = "Create a product")]
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        stock: String,
        #[arg(long = "category")]
        category_id: String,
        #[arg(long, help = "Mark the product as personalizable")]
        personalizable: bool,
        #[arg(long, default_value = "")]
        details: String,
        #[arg(long, help = "Path to the product image")]
        image: PathBuf,
    },

    #[command(about = "Update a product")]
    Update {
        #[arg(help = "Product id")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        stock: Option<String>,
        #[arg(long = "category")]
        category_id: Option<String>,
        #[arg(long)]
        personalizable: Option<bool>,
        #[arg(long)]
        details: Option<String>,
        #[arg(long, help = "Replacement image; omit to keep the stored one")]
        image: Option<PathBuf>,
    },

    #[command(about = "Delete a product")]
    Delete {
        #[arg(help = "Product id")]
        id: String,
    },
}

pub async fn handle(cmd: ProductCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    let mut admin = ProductAdmin::new(ApiClient::new(cfg.server_url));

    match cmd {
        ProductCommands::List => {
            admin.initialize().await.map_err(|e| anyhow::anyhow!("{}", e))?;

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&admin.products)?);
                }
                OutputFormat::Text => {
                    if admin.products.is_empty() {
                        println!("No products");
                    }
                    for product in &admin.products {
                        println!(
                            "{}  {}  ${}  stock {}  [{}]",
                            product.id,
                            product.name,
                            product.price,
                            product.stock,
                            product.category.name().unwrap_or(product.category.id()),
                        );
                    }
                }
            }
            Ok(())
        }

        ProductCommands::Create {
            name,
            description,
            price,
            stock,
            category_id,
            personalizable,
            details,
            image,
        } => {
            // Categories feed the enrichment of the created record
            if let Err(e) = admin.fetch_categories().await {
                tracing::warn!("Could not load categories: {}", e);
            }

            admin.form.name = name;
            admin.form.description = description;
            admin.form.price = price;
            admin.form.stock = stock;
            admin.form.category_id = category_id;
            admin.form.is_personalizable = personalizable;
            admin.form.details = details;
            admin.form.image = Some(load_image_file(&image).await?);

            report_mutation(admin.create_product().await, &output_format)
        }

        ProductCommands::Update {
            id,
            name,
            description,
            price,
            stock,
            category_id,
            personalizable,
            details,
            image,
        } => {
            admin.fetch_products().await.map_err(|e| anyhow::anyhow!("{}", e))?;

            let Some(existing) = admin.products.iter().find(|p| p.id == id).cloned() else {
                utils::output_error(&output_format, &format!("Product {} not found", id), None)?;
                std::process::exit(1);
            };
            admin.begin_edit(&existing);

            if let Some(v) = name {
                admin.form.name = v;
            }
            if let Some(v) = description {
                admin.form.description = v;
            }
            if let Some(v) = price {
                admin.form.price = v;
            }
            if let Some(v) = stock {
                admin.form.stock = v;
            }
            if let Some(v) = category_id {
                admin.form.category_id = v;
            }
            if let Some(v) = personalizable {
                admin.form.is_personalizable = v;
            }
            if let Some(v) = details {
                admin.form.details = v;
            }
            if let Some(path) = image {
                admin.form.image = Some(load_image_file(&path).await?);
            }

            report_mutation(admin.save_edit().await, &output_format)
        }

        ProductCommands::Delete { id } => {
            report_mutation(admin.delete_product(&id).await, &output_format)
        }
    }
}

fn report_mutation(
    result: Result<Option<String>, ClientError>,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    match result {
        Ok(message) => utils::output_success(
            output_format,
            message.as_deref().unwrap_or("Done"),
            None,
        ),
        Err(error) => {
            let field_errors = error.field_errors().cloned();
            utils::output_error(output_format, &error.to_string(), field_errors.as_ref())?;
            std::process::exit(1);
        }
    }
}
