use clap::Parser;
use std::sync::Arc;
use storefront_client::adapters::{ApiClient, LocalStorage};
use storefront_client::app::{CheckoutForm, LoginUseCase, RegisterUseCase, Storefront};
use storefront_client::card::{self, CardInfo};
use storefront_client::config::cli::{CartCommand, CustomerCommand, WishlistCommand};
use storefront_client::config::{CliConfig, Command, Settings, StorefrontConfig};
use storefront_client::domain::model::{
    CartItem, DeliveryData, NewCustomer, Product, RegisterData, Transaction,
};
use storefront_client::domain::ports::CustomerRepository;
use storefront_client::guard::{guard, Access, Route};
use storefront_client::store::{Action, CartAction};
use storefront_client::utils::{logger, validation::Validate};
use storefront_client::{Result, StorefrontError};

type Session = Storefront<ApiClient>;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match StorefrontConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                std::process::exit(e.exit_code());
            }
        },
        None => StorefrontConfig::default(),
    };

    let settings = Settings::resolve(
        cli.api_url.as_deref(),
        cli.data_dir.as_deref(),
        cli.json_logs,
        &file_config,
    );

    if settings.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = file_config.validate().and_then(|_| settings.validate()) {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if let Err(e) = run(cli.command, &settings).await {
        tracing::error!("Command failed: {} (severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let storage = Arc::new(LocalStorage::open(&settings.data_dir)?);
    let api = Arc::new(ApiClient::with_timeout(
        settings.base_url.clone(),
        storage.clone(),
        settings.timeout,
    )?);
    let mut session = Storefront::new(api.clone(), storage);

    match command {
        Command::Products => {
            for product in session.load_products().await? {
                print_product(product);
            }
        }
        Command::Product { id } => {
            let product = session.load_product(&id).await?;
            print_product(&product);
            if !product.description.is_empty() {
                println!("    {}", product.description);
            }
        }
        Command::Login { email, password } => {
            enter(&session, &Route::Login)?;
            report_field_errors(&LoginUseCase::<ApiClient>::validate(&email, &password));
            let user = session.login(&email, &password).await?;
            println!("✅ Logged in as {} ({})", user.full_name(), user.email);
        }
        Command::Register(args) => {
            enter(&session, &Route::Register)?;
            let data = RegisterData {
                first_name: args.first_name,
                last_name: args.last_name,
                email: args.email,
                password: args.password,
                confirm_password: args.confirm_password,
            };
            report_field_errors(&RegisterUseCase::<ApiClient>::validate(&data));
            let user = session.register(&data).await?;
            println!("✅ Welcome, {}!", user.first_name);
        }
        Command::Logout => {
            session.logout()?;
            println!("👋 Logged out");
        }
        Command::Cart(cart) => run_cart(&mut session, cart).await?,
        Command::Wishlist(wishlist) => run_wishlist(&mut session, wishlist).await?,
        Command::Checkout(args) => {
            enter(&session, &Route::Checkout)?;
            let form = CheckoutForm {
                card: CardInfo {
                    number: args.card.number,
                    holder: args.card.holder,
                    expiry: args.card.expiry,
                    cvv: args.card.cvv,
                },
                delivery: DeliveryData {
                    recipient: args.recipient,
                    address: args.address,
                    city: args.city,
                    phone: args.phone,
                },
                installments: args.installments,
            };
            let transaction = session.checkout(&form).await?;
            print_transaction(&transaction);
        }
        Command::Orders => {
            enter(&session, &Route::Orders)?;
            let orders = session.load_orders().await?;
            if orders.is_empty() {
                println!("No orders yet");
            }
            for transaction in orders {
                println!("{}  {:<9}  {}", transaction.id, transaction.status, transaction.total.round_dp(2));
            }
        }
        Command::Order { id } => {
            enter(&session, &Route::OrderStatus(id.clone()))?;
            let transaction = session.load_order(&id).await?;
            print_transaction(&transaction);
        }
        Command::Track { transaction_id } => {
            enter(&session, &Route::OrderStatus(transaction_id.clone()))?;
            let delivery = session.track_order(&transaction_id).await?;
            println!("📦 Delivery {} is {}", delivery.id, delivery.status);
            println!("   to {}", delivery.address);
            for update in &delivery.updates {
                println!("   {}  {:<10}  {}", update.at.format("%Y-%m-%d %H:%M"), update.status, update.description);
            }
        }
        Command::Card(args) => {
            let info = CardInfo {
                number: args.number,
                holder: args.holder,
                expiry: args.expiry,
                cvv: args.cvv,
            };
            let validation = card::validate_card_info(&info);
            println!("{} {}", info.card_type(), card::mask_card_number(&info.number));
            if validation.is_valid {
                println!("✅ Card details look valid");
            } else {
                for (field, message) in &validation.errors {
                    println!("   {}: {}", field.as_str(), message);
                }
                return Err(StorefrontError::validation(
                    "card",
                    "Card details are not valid",
                ));
            }
        }
        Command::Customers(customers) => {
            enter(&session, &Route::Profile)?;
            match customers {
                CustomerCommand::List => {
                    for customer in api.list_customers().await? {
                        println!("{}  {:<24}  {}", customer.id, customer.full_name, customer.email);
                    }
                }
                CustomerCommand::Get { id } => {
                    let customer = api.get_customer(&id).await?;
                    println!("{}  {:<24}  {}", customer.id, customer.full_name, customer.email);
                }
                CustomerCommand::Create { email, full_name } => {
                    let customer = api.create_customer(&NewCustomer { email, full_name }).await?;
                    println!("✅ Created customer {}", customer.id);
                }
            }
        }
    }

    Ok(())
}

async fn run_cart(session: &mut Session, command: CartCommand) -> Result<()> {
    match command {
        CartCommand::Show => {}
        CartCommand::Add { product_id, quantity } => {
            let product = session.load_product(&product_id).await?;
            if !session.store().cart.fits_stock(&product, quantity) {
                return Err(StorefrontError::validation(
                    "quantity",
                    format!("Only {} of {} in stock", product.stock, product.name),
                ));
            }
            session.add_to_cart(product, quantity);
        }
        CartCommand::Remove { product_id } => session.remove_from_cart(&product_id),
        CartCommand::Set { product_id, quantity } => session.set_cart_quantity(&product_id, quantity),
        CartCommand::Clear => session.dispatch(Action::Cart(CartAction::Clear)),
    }
    print_cart(&session.store().cart.items, session.store().cart.total());
    Ok(())
}

async fn run_wishlist(session: &mut Session, command: WishlistCommand) -> Result<()> {
    enter(session, &Route::Wishlist)?;
    match command {
        WishlistCommand::Show => {}
        WishlistCommand::Add { product_id } => {
            let product = session.load_product(&product_id).await?;
            session.add_to_wishlist(product);
        }
        WishlistCommand::Remove { product_id } => session.remove_from_wishlist(&product_id),
        WishlistCommand::Move { product_id } => session.move_to_cart(&product_id),
    }
    let wishlist = &session.store().wishlist;
    if wishlist.items.is_empty() {
        println!("Your wishlist is empty");
    }
    for item in &wishlist.items {
        println!("♡ {}  (added {})", item.product.name, item.added_at.format("%Y-%m-%d"));
    }
    Ok(())
}

/// Applies the route guard the way a page would before rendering.
fn enter(session: &Session, route: &Route) -> Result<()> {
    match guard(route, session.store()) {
        Access::Allow => Ok(()),
        Access::Redirect(Route::Login) => Err(StorefrontError::Unauthorized {
            message: "Log in first: storefront login --email <EMAIL>".to_string(),
        }),
        Access::Redirect(Route::Cart) => Err(StorefrontError::CheckoutError {
            message: "Your cart is empty".to_string(),
        }),
        Access::Redirect(Route::Home) => Err(StorefrontError::validation(
            "session",
            "You are already logged in; run `storefront logout` first",
        )),
        Access::Redirect(other) => Err(StorefrontError::validation(
            "route",
            format!("Not available here, go to {}", other.path()),
        )),
    }
}

fn report_field_errors(errors: &[(String, String)]) {
    for (field, message) in errors {
        eprintln!("   {}: {}", field, message);
    }
}

fn print_product(product: &Product) {
    println!(
        "{:<8} {:<32} {:>10}  ★ {:.1}",
        product.id,
        product.name,
        product.price.round_dp(2),
        product.rating
    );
}

fn print_cart(items: &[CartItem], total: rust_decimal::Decimal) {
    if items.is_empty() {
        println!("🛒 Your cart is empty");
        return;
    }
    for item in items {
        println!(
            "{:>3} × {:<32} {:>10}",
            item.quantity,
            item.product.name,
            item.subtotal().round_dp(2)
        );
    }
    println!("Total: {}", total.round_dp(2));
}

fn print_transaction(transaction: &Transaction) {
    println!("🧾 Order {}: {}", transaction.id, transaction.status);
    for item in &transaction.items {
        println!("   {} × {} @ {}", item.quantity, item.name, item.unit_price.round_dp(2));
    }
    if let Some(payment) = &transaction.payment {
        println!("   Paid with {} {}", payment.card_type, payment.masked_number);
    }
    println!("   Ship to {}, {}, {}", transaction.delivery.recipient, transaction.delivery.address, transaction.delivery.city);
    println!("   Total: {}", transaction.total.round_dp(2));
}
