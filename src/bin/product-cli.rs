use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "product-cli")]
#[command(about = "Command line client for the product API", long_about = None)]
struct Cli {
    #[arg(short, long, env = "PRODUCT_API_URL", default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product
    List,
    /// Create a product
    Create(ProductArgs),
    /// Replace an existing product
    Replace {
        /// Id of the product to replace
        id: u64,
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Check service status
    Status,
}

#[derive(Args)]
struct ProductArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    gst: f64,
    #[arg(long)]
    licence: String,
}

impl ProductArgs {
    fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "price": self.price,
            "gst": self.gst,
            "licenceNumber": self.licence,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::List => client.get(format!("{}/", base)).send().await?,
        Commands::Create(product) => {
            client
                .post(format!("{}/", base))
                .json(&product.to_json())
                .send()
                .await?
        }
        Commands::Replace { id, product } => {
            client
                .put(format!("{}/{}", base, id))
                .json(&product.to_json())
                .send()
                .await?
        }
        Commands::Status => client.get(format!("{}/status", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: product API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
