//! Demo run: seeds a small menu, reorders it the way the admin screens do, then fills a
//! cart and prices it.

use aroma_menu::cart::{CartStore, FileStorage};
use aroma_menu::checkout::{format_eur, DeliveryPolicy, OrderType};
use aroma_menu::clients::CategoryClient;
use aroma_menu::config::ShopConfig;
use aroma_menu::lifecycle::MenuSystem;
use aroma_menu::model::{Category, CategoryCreate, MenuItem, MenuItemCreate};
use aroma_menu::reorder::{MoveOutcome, Reconciler};
use aroma_menu::storefront::MenuFilter;
use ordered_actor::tracing::setup_tracing;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = ShopConfig::load()?;
    info!(?config, "Starting menu demo");

    let system = MenuSystem::new(&config);

    let span = tracing::info_span!("seed");
    let (starters, mains) = async {
        let categories = &system.category_client;
        let items = &system.menu_item_client;

        let starters = categories
            .create_category(CategoryCreate::new("Starters", "starters"))
            .await?;
        let mains = categories
            .create_category(CategoryCreate::new("Mains", "mains"))
            .await?;
        categories
            .create_category(CategoryCreate::new("Drinks", "drinks"))
            .await?;

        items
            .create_item(MenuItemCreate::new(starters, "Vegetable Samosa", 5.5))
            .await?;
        items
            .create_item(MenuItemCreate::new(starters, "Onion Bhaji", 5.0))
            .await?;
        let butter_chicken = items
            .create_item(MenuItemCreate {
                spice_level: 1,
                ..MenuItemCreate::new(mains, "Butter Chicken", 16.5)
            })
            .await?;
        let vindaloo = items
            .create_item(MenuItemCreate {
                spice_level: 3,
                ..MenuItemCreate::new(mains, "Chicken Vindaloo", 17.0)
            })
            .await?;
        items.set_featured(vec![butter_chicken, vindaloo]).await?;

        Ok::<_, Box<dyn std::error::Error>>((starters, mains))
    }
    .instrument(span)
    .await?;

    // Admin: put Drinks first, then move Chicken Vindaloo to the top of Mains.
    let mut category_order: Reconciler<Category, CategoryClient> =
        Reconciler::new(system.category_client.clone());
    category_order.refresh().await?;
    if let Some(pending) = category_order.begin_move(2, 0) {
        let shown: Vec<&str> = category_order
            .visible()
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        info!(order = ?shown, "Showing new order while saving");
        report(category_order.commit(pending).await, category_order.notice());
    }

    let mut item_order = Reconciler::<MenuItem, _>::new(system.menu_item_client.clone());
    item_order.refresh().await?;
    item_order.set_scope(Some(mains));
    report(item_order.move_up(1).await, item_order.notice());

    let storefront = system.storefront(&config);
    for section in storefront.menu().await? {
        let names: Vec<&str> = section.items.iter().map(|i| i.name.as_str()).collect();
        info!(category = %section.category.name, items = ?names, "Menu section");
    }

    let search: Vec<String> = storefront
        .filtered_items(&MenuFilter::search("chicken"))
        .await?
        .into_iter()
        .map(|item| item.name)
        .collect();
    info!(query = "chicken", results = ?search, "Menu search");

    // Customer: fill the cart from the starters and one featured dish.
    let mut cart = CartStore::new(
        FileStorage::new(&config.cart_path),
        config.cart_storage_key.clone(),
    );
    for item in system.menu_item_client.list_by_category(starters).await? {
        cart.add_item_with_quantity(item.to_cart_item(), 2);
    }
    if let Some(featured) = storefront.featured().await?.first() {
        cart.add_item(featured.to_cart_item());
    }
    for suggestion in storefront.suggestions(cart.state()).await? {
        info!(name = %suggestion.name, "You might also like");
    }

    let quote = DeliveryPolicy::from_config(&config).quote(cart.state(), OrderType::Delivery);
    info!(
        items = cart.total_items(),
        subtotal = %format_eur(quote.subtotal),
        delivery = %format_eur(quote.delivery_fee),
        total = %format_eur(quote.total),
        "Cart priced"
    );

    drop(category_order);
    drop(item_order);
    drop(storefront);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

fn report(outcome: MoveOutcome, notice: Option<&str>) {
    match outcome {
        MoveOutcome::Saved => info!("Order saved"),
        MoveOutcome::Ignored => warn!("Move ignored"),
        MoveOutcome::Failed(e) => error!(error = %e, notice, "Move failed"),
    }
}
