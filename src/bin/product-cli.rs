use clap::{Parser, Subcommand};
use product_sdk::{ProductClient, UpdateProduct};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "product-cli")]
#[command(about = "Command-line client for the product service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a product
    Create { name: String, description: String },
    /// List all products
    List,
    /// Show one product
    Get { id: u64 },
    /// Change a product's name and/or description
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a product
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ProductClient::new(&cli.url);

    match cli.command {
        Commands::Create { name, description } => {
            print_json(&client.create(&name, &description).await?)?;
        }
        Commands::List => {
            print_json(&client.list().await?)?;
        }
        Commands::Get { id } => {
            print_found(id, client.get(id).await?)?;
        }
        Commands::Update { id, name, description } => {
            let patch = UpdateProduct {
                name: name.as_deref(),
                description: description.as_deref(),
            };
            print_found(id, client.update(id, &patch).await?)?;
        }
        Commands::Delete { id } => {
            print_found(id, client.delete(id).await?)?;
        }
    }

    Ok(())
}

fn print_found<T: Serialize>(id: u64, value: Option<T>) -> Result<(), Box<dyn std::error::Error>> {
    match value {
        Some(value) => print_json(&value),
        None => {
            eprintln!("Error: product {} not found", id);
            std::process::exit(1);
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
