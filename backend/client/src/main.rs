use std::{
    io::{self, Stdout},
    path::PathBuf,
};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use client::{Api, ClientConfig, FileStorage, MenuEndpoint, Shop, Surface, TerminalView, View};
use menu::{Rating, Review, Size};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Server base URL
    #[arg(long, env = "BOBA_API_URL")]
    api: Option<String>,

    /// JSON file with `apiBaseUrl`, `menuEndpoint`, `pageSize`
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    menu_endpoint: Option<MenuEndpoint>,

    /// Where the cart is kept between runs
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    #[arg(long)]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the first pages of the menu
    Menu {
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Show one category
    Category { name: String },

    /// Customize an item and add it to the cart
    Add {
        item: String,

        #[arg(long)]
        ice: String,

        #[arg(long)]
        sugar: String,

        #[arg(long = "topping")]
        toppings: Vec<String>,

        #[arg(long)]
        size: Option<Size>,
    },

    /// Show the cart
    Cart,

    /// Remove the cart entry at a zero-based index
    Remove { index: usize },

    /// Send the cart as an order
    Checkout,

    /// Leave a review
    Review {
        #[arg(long)]
        name: String,

        #[arg(long)]
        rating: u8,

        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let mut config = ClientConfig::load(args.config.as_deref());
    if let Some(api) = args.api {
        config.api_base_url = api;
    }
    if let Some(endpoint) = args.menu_endpoint {
        config.menu_endpoint = endpoint;
    }
    if let Some(storage_dir) = args.storage_dir {
        config.storage_dir = storage_dir;
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }

    match args.command {
        Command::Category { name } => {
            let api = Api::new(&config.api_base_url, config.menu_endpoint)?;
            let items = api.fetch_category(&name).await?;
            TerminalView::new(io::stdout()).append_menu_items(&items);
        }
        Command::Menu { pages } => {
            let view = terminal().muted(Surface::CartItems);
            let mut shop = open_shop(&config, view).await?;
            for _ in 1..pages {
                shop.render_next_page();
            }
        }
        Command::Add {
            item,
            ice,
            sugar,
            toppings,
            size,
        } => {
            let view = terminal().muted(Surface::Menu).muted(Surface::CartItems);
            let mut shop = open_shop(&config, view).await?;
            shop.view_mut().unmute(Surface::CartItems);
            if !shop.open_customization(&item) {
                bail!("cannot customize {item:?}");
            }
            shop.submit_customization(&ice, &sugar, &toppings, size)?;
        }
        Command::Cart => {
            open_shop(&config, terminal().muted(Surface::Menu)).await?;
        }
        Command::Remove { index } => {
            let view = terminal().muted(Surface::Menu).muted(Surface::CartItems);
            let mut shop = open_shop(&config, view).await?;
            shop.view_mut().unmute(Surface::CartItems);
            let removed = shop.remove_from_cart(index)?;
            println!("Removed {removed}");
        }
        Command::Checkout => {
            let mut shop = open_shop(&config, terminal().muted(Surface::Menu)).await?;
            shop.checkout().await.context("order was not placed, cart kept")?;
            println!("Order placed!");
        }
        Command::Review {
            name,
            rating,
            message,
        } => {
            let review = Review {
                name,
                rating: Rating(rating),
                message,
            };
            let view = terminal().muted(Surface::Menu).muted(Surface::CartItems);
            let mut shop = open_shop(&config, view).await?;
            shop.submit_review(&review).await?;
        }
    }

    Ok(())
}

fn terminal() -> TerminalView<Stdout> {
    TerminalView::new(io::stdout())
}

async fn open_shop(
    config: &ClientConfig,
    view: TerminalView<Stdout>,
) -> anyhow::Result<Shop<FileStorage, TerminalView<Stdout>>> {
    let storage = FileStorage::new(&config.storage_dir);

    Ok(Shop::init(config, storage, view).await?)
}
