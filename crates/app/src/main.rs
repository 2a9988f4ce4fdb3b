//! Store Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use store_app::{
    blocking::BlockingProductsService,
    domain::products::{
        ProductsServiceError,
        data::{NewProduct, ProductFilter, ProductUpdate},
        records::ProductRecord,
    },
};

#[derive(Debug, Parser)]
#[command(name = "store-app", about = "Product store CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Product(ProductCommand),
}

#[derive(Debug, Args)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Create a product
    Create(CreateProductArgs),

    /// Show a single product
    Get(ProductIdArgs),

    /// List products, optionally filtered
    List(ListProductsArgs),

    /// Update some fields of a product
    Update(UpdateProductArgs),

    /// Delete a product
    Delete(DeleteProductArgs),
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    quantity: i64,

    /// Decimal price, e.g. 19.99
    #[arg(long)]
    price: Decimal,

    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    status: bool,
}

#[derive(Debug, Args)]
struct ProductIdArgs {
    id: String,
}

#[derive(Debug, Args)]
struct ListProductsArgs {
    #[arg(long)]
    min_price: Option<Decimal>,

    #[arg(long)]
    max_price: Option<Decimal>,

    #[arg(long)]
    status: Option<bool>,
}

#[derive(Debug, Args)]
struct UpdateProductArgs {
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    quantity: Option<i64>,

    #[arg(long)]
    price: Option<Decimal>,

    #[arg(long)]
    status: Option<bool>,
}

#[derive(Debug, Args)]
struct DeleteProductArgs {
    id: String,

    /// Fail when no product has the given id
    #[arg(long)]
    strict: bool,
}

pub fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let Commands::Product(ProductCommand { command }) = cli.command;

    let database_url = cli
        .database_url
        .ok_or_else(|| "DATABASE_URL or --database-url is required".to_string())?;

    let products = BlockingProductsService::connect(&database_url)
        .map_err(|error| format!("failed to initialise product store: {error}"))?;

    match command {
        ProductSubcommand::Create(args) => create_product(&products, args),
        ProductSubcommand::Get(args) => get_product(&products, &args.id),
        ProductSubcommand::List(args) => list_products(&products, args),
        ProductSubcommand::Update(args) => update_product(&products, args),
        ProductSubcommand::Delete(args) => delete_product(&products, &args),
    }
}

fn create_product(
    products: &BlockingProductsService,
    args: CreateProductArgs,
) -> Result<(), String> {
    let product = NewProduct {
        name: args.name,
        quantity: args.quantity,
        price: args.price,
        status: args.status,
    }
    .validated()
    .map_err(|error| error.to_string())?;

    let product = products
        .create_product(product)
        .map_err(|error| format!("failed to create product: {error}"))?;

    print_product(&product);

    Ok(())
}

fn get_product(products: &BlockingProductsService, id: &str) -> Result<(), String> {
    let product = products.get_product(id).map_err(|error| describe(id, &error))?;

    print_product(&product);

    Ok(())
}

fn list_products(products: &BlockingProductsService, args: ListProductsArgs) -> Result<(), String> {
    let found = products
        .list_products(ProductFilter {
            min_price: args.min_price,
            max_price: args.max_price,
            status: args.status,
        })
        .map_err(|error| format!("failed to list products: {error}"))?;

    for (index, product) in found.iter().enumerate() {
        if index > 0 {
            println!();
        }

        print_product(product);
    }

    println!("count: {}", found.len());

    Ok(())
}

fn update_product(
    products: &BlockingProductsService,
    args: UpdateProductArgs,
) -> Result<(), String> {
    let update = ProductUpdate {
        name: args.name,
        quantity: args.quantity,
        price: args.price,
        status: args.status,
    };

    if update.is_empty() {
        return Err("nothing to update".to_string());
    }

    let update = update.validated().map_err(|error| error.to_string())?;

    let product = products
        .update_product(&args.id, update)
        .map_err(|error| describe(&args.id, &error))?;

    print_product(&product);

    Ok(())
}

fn delete_product(
    products: &BlockingProductsService,
    args: &DeleteProductArgs,
) -> Result<(), String> {
    if args.strict {
        products
            .delete_product(&args.id)
            .map_err(|error| describe(&args.id, &error))?;

        println!("deleted: true");
    } else {
        let deleted = products
            .try_delete_product(&args.id)
            .map_err(|error| describe(&args.id, &error))?;

        println!("deleted: {deleted}");
    }

    Ok(())
}

fn describe(id: &str, error: &ProductsServiceError) -> String {
    match error {
        ProductsServiceError::NotFound => format!("product {id} not found"),
        other => format!("product {id}: {other}"),
    }
}

fn print_product(product: &ProductRecord) {
    println!("id: {}", product.id);
    println!("name: {}", product.name);
    println!("quantity: {}", product.quantity);
    println!("price: {}", product.price);
    println!("status: {}", product.status);
    println!("created_at: {}", product.created_at);
    println!("updated_at: {}", product.updated_at);
}
