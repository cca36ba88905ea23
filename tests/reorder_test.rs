use aroma_menu::category_actor::CategoryError;
use aroma_menu::clients::{CategoryClient, MenuItemClient};
use aroma_menu::config::ShopConfig;
use aroma_menu::lifecycle::MenuSystem;
use aroma_menu::model::{Category, CategoryCreate, CategoryId, MenuItem, MenuItemCreate};
use aroma_menu::reorder::{MoveOutcome, Reconciler, ReorderError};
use ordered_actor::mock::MockClient;
use ordered_actor::{OrderedClient, StoreError};

async fn seed_categories(client: &CategoryClient, names: &[&str]) -> Vec<CategoryId> {
    let mut ids = Vec::new();
    for name in names {
        let id = client
            .create_category(CategoryCreate::new(*name, name.to_lowercase()))
            .await
            .expect("Failed to create category");
        ids.push(id);
    }
    ids
}

fn category_names(categories: &[Category]) -> Vec<String> {
    categories.iter().map(|c| c.name.clone()).collect()
}

/// Moving the last of three to the front renumbers all three from zero.
#[tokio::test]
async fn test_move_last_to_front() {
    let system = MenuSystem::new(&ShopConfig::default());
    seed_categories(&system.category_client, &["A", "B", "C"]).await;

    let mut reconciler = Reconciler::<Category, _>::new(system.category_client.clone());
    reconciler.refresh().await.unwrap();

    assert_eq!(reconciler.move_item(2, 0).await, MoveOutcome::Saved);

    let stored = system.category_client.list(None).await.unwrap();
    assert_eq!(category_names(&stored), vec!["C", "A", "B"]);
    let orders: Vec<u32> = stored.iter().map(|c| c.display_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(category_names(reconciler.items()), vec!["C", "A", "B"]);
    assert_eq!(reconciler.notice(), None);

    drop(reconciler);
    system.shutdown().await.unwrap();
}

/// When an id vanished between load and move, the store stops at it and the admin
/// view ends up showing exactly what the store holds.
#[tokio::test]
async fn test_partial_reorder_shows_store_state() {
    let system = MenuSystem::new(&ShopConfig::default());
    let ids = seed_categories(&system.category_client, &["A", "B", "C", "D", "E"]).await;

    let mut reconciler = Reconciler::<Category, _>::new(system.category_client.clone());
    reconciler.refresh().await.unwrap();

    // B disappears behind the admin's back
    system.category_client.delete(ids[1]).await.unwrap();

    // submitted order is [E, A, B, C, D]; B is third
    let outcome = reconciler.move_item(4, 0).await;

    match outcome {
        MoveOutcome::Failed(ReorderError::Save(message)) => {
            assert!(message.contains(&ids[1].to_string()), "{message}");
        }
        other => panic!("Expected a save failure, got {:?}", other),
    }
    assert!(reconciler.notice().unwrap().contains(&ids[1].to_string()));

    // E and A were renumbered before the failure, C and D kept their old positions
    let stored = system.category_client.list(None).await.unwrap();
    assert_eq!(category_names(&stored), vec!["E", "A", "C", "D"]);
    assert_eq!(category_names(reconciler.items()), category_names(&stored));

    drop(reconciler);
    system.shutdown().await.unwrap();
}

/// The client refetches after a failure instead of keeping its optimistic guess.
#[tokio::test]
async fn test_failed_reorder_refetches_previous_order() {
    let mut mock = MockClient::<Category>::new();
    let before: Vec<Category> = ["A", "B", "C", "D", "E"]
        .iter()
        .zip(0u32..)
        .map(|(name, order)| Category {
            id: CategoryId(order + 1),
            name: name.to_string(),
            slug: name.to_lowercase(),
            display_order: order,
            is_active: true,
        })
        .collect();
    mock.expect_list().return_ok(before.clone());
    mock.expect_reorder().return_err(StoreError::ReorderFailed {
        id: "category_2".into(),
        position: 2,
        reason: Box::new(StoreError::NotFound("category_2".into())),
    });
    mock.expect_list().return_ok(before);

    let client = CategoryClient::new(mock.client());
    let mut reconciler = Reconciler::<Category, _>::new(client.clone());
    reconciler.refresh().await.unwrap();

    let outcome = reconciler.move_item(4, 0).await;

    assert!(matches!(outcome, MoveOutcome::Failed(ReorderError::Save(_))));
    assert_eq!(category_names(reconciler.items()), vec!["A", "B", "C", "D", "E"]);
    assert_eq!(
        mock.reorder_calls(),
        vec![vec![
            CategoryId(5),
            CategoryId(1),
            CategoryId(2),
            CategoryId(3),
            CategoryId(4)
        ]]
    );
    mock.verify();
}

#[tokio::test]
async fn test_reorder_error_names_failing_id() {
    let system = MenuSystem::new(&ShopConfig::default());
    let ids = seed_categories(&system.category_client, &["A", "B"]).await;

    let result = system
        .category_client
        .reorder(vec![ids[1], CategoryId(99), ids[0]])
        .await;

    match result {
        Err(CategoryError::ReorderFailed { id, .. }) => assert_eq!(id, "category_99"),
        other => panic!("Expected ReorderFailed, got {:?}", other),
    }

    // the first position was applied before the failure
    let b = system.category_client.get(ids[1]).await.unwrap().unwrap();
    assert_eq!(b.display_order, 0);

    let empty = system.category_client.reorder(vec![]).await;
    assert!(matches!(empty, Err(CategoryError::ValidationError(_))));

    system.shutdown().await.unwrap();
}

/// Reordering inside one category leaves the other categories alone.
#[tokio::test]
async fn test_scoped_item_reorder() {
    let system = MenuSystem::new(&ShopConfig::default());
    let categories = seed_categories(&system.category_client, &["Starters", "Mains"]).await;
    let (starters, mains) = (categories[0], categories[1]);

    let items = &system.menu_item_client;
    for (category, name) in [
        (starters, "Samosa"),
        (mains, "Korma"),
        (starters, "Pakora"),
        (mains, "Biryani"),
        (mains, "Dal"),
    ] {
        items
            .create_item(MenuItemCreate::new(category, name, 10.0))
            .await
            .expect("Failed to create item");
    }

    let mut reconciler: Reconciler<MenuItem, MenuItemClient> =
        Reconciler::new(system.menu_item_client.clone());
    reconciler.refresh().await.unwrap();
    reconciler.set_scope(Some(mains));

    let visible: Vec<&str> = reconciler.visible().into_iter().map(|i| i.name.as_str()).collect();
    assert_eq!(visible, vec!["Korma", "Biryani", "Dal"]);

    assert_eq!(reconciler.move_down(0).await, MoveOutcome::Saved);

    let mains_items = items.list_by_category(mains).await.unwrap();
    let names: Vec<&str> = mains_items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Biryani", "Korma", "Dal"]);
    let orders: Vec<u32> = mains_items.iter().map(|i| i.display_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);

    let starter_items = items.list_by_category(starters).await.unwrap();
    let names: Vec<&str> = starter_items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Samosa", "Pakora"]);

    let visible: Vec<&str> = reconciler.visible().into_iter().map(|i| i.name.as_str()).collect();
    assert_eq!(visible, vec!["Biryani", "Korma", "Dal"]);

    drop(reconciler);
    system.shutdown().await.unwrap();
}
