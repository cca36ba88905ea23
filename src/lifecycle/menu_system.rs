use crate::category_actor;
use crate::clients::{CategoryClient, MenuItemClient};
use crate::config::ShopConfig;
use crate::menu_item_actor;
use crate::storefront::Storefront;
use tracing::{error, info};

/// Starts, wires and stops the catalog actors.
///
/// The category actor runs without dependencies; the menu item actor receives a clone
/// of the [`CategoryClient`] as its context so it can validate `category_id`.
///
/// ```rust
/// use aroma_menu::config::ShopConfig;
/// use aroma_menu::lifecycle::MenuSystem;
/// use aroma_menu::model::{CategoryCreate, MenuItemCreate};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = MenuSystem::new(&ShopConfig::default());
///
///     let mains = system.category_client.create_category(CategoryCreate::new("Mains", "mains")).await?;
///     system.menu_item_client.create_item(MenuItemCreate::new(mains, "Korma", 14.0)).await?;
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct MenuSystem {
    pub category_client: CategoryClient,
    pub menu_item_client: MenuItemClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MenuSystem {
    /// Spawns both actors. Must be called inside a tokio runtime.
    pub fn new(config: &ShopConfig) -> Self {
        let (category_actor, category_client) = category_actor::new(config.actor_buffer);
        let category_handle = tokio::spawn(category_actor.run(()));

        let (menu_item_actor, menu_item_client) = menu_item_actor::new(config.actor_buffer);
        let menu_item_handle = tokio::spawn(menu_item_actor.run(category_client.clone()));

        info!(buffer = config.actor_buffer, "Menu system started");
        Self {
            category_client,
            menu_item_client,
            handles: vec![category_handle, menu_item_handle],
        }
    }

    /// A storefront over this system's clients.
    pub fn storefront(&self, config: &ShopConfig) -> Storefront {
        Storefront::new(
            self.category_client.clone(),
            self.menu_item_client.clone(),
            config,
        )
    }

    /// Drops the clients and waits for both actors to finish.
    ///
    /// The menu item actor stops first; its exit drops the category client it held,
    /// which lets the category actor stop too. Clones handed out earlier (storefronts,
    /// reconcilers) keep their actor alive until they are dropped as well.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down menu system...");
        drop(self.category_client);
        drop(self.menu_item_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Menu system shutdown complete.");
        Ok(())
    }
}
