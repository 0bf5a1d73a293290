use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "storefront")]
#[command(about = "Browse the store, manage your cart and track orders from the terminal")]
pub struct CliConfig {
    /// Base URL of the store API (falls back to STOREFRONT_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding the session token, cart and wishlist
    #[arg(long, env = "STOREFRONT_DATA_DIR", global = true)]
    pub data_dir: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long, env = "STOREFRONT_CONFIG", global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List products
    Products,
    /// Show one product
    Product { id: String },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register(RegisterArgs),
    Logout,
    /// Manage the cart
    #[command(subcommand)]
    Cart(CartCommand),
    /// Manage the wishlist
    #[command(subcommand)]
    Wishlist(WishlistCommand),
    /// Pay for the current cart
    Checkout(CheckoutArgs),
    /// List your orders
    Orders,
    /// Show one order
    Order { id: String },
    /// Delivery status of an order
    Track { transaction_id: String },
    /// Check card details without placing an order
    Card(CardArgs),
    #[command(subcommand)]
    Customers(CustomerCommand),
}

#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long, env = "STOREFRONT_CONFIRM_PASSWORD", hide_env_values = true)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CartCommand {
    Show,
    Add {
        product_id: String,
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    Remove { product_id: String },
    Set { product_id: String, quantity: u32 },
    Clear,
}

#[derive(Debug, Clone, Subcommand)]
pub enum WishlistCommand {
    Show,
    Add { product_id: String },
    Remove { product_id: String },
    /// Move an item into the cart
    Move { product_id: String },
}

#[derive(Debug, Clone, Args)]
pub struct CardArgs {
    #[arg(long)]
    pub number: String,
    #[arg(long)]
    pub holder: String,
    /// MM/YY
    #[arg(long)]
    pub expiry: String,
    #[arg(long)]
    pub cvv: String,
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    #[command(flatten)]
    pub card: CardArgs,
    #[arg(long)]
    pub recipient: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, default_value = "1")]
    pub installments: u32,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CustomerCommand {
    List,
    Get { id: String },
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
    },
}
