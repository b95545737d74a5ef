use models::{ItemKind, ItemReport, ReportedItem};
use tracing::{info, instrument};

use super::RecordStore;
use crate::errors::ServiceError;
use crate::ids::ITEM_PREFIX;
use crate::storage::{Collection, CollectionStorage};

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl<S: CollectionStorage> RecordStore<S> {
    /// Add a catalog entry with status `reported` and return its identifier.
    /// Fields are stored as given, blank ones included.
    ///
    /// The reporter is only recorded in the log; items carry no owner field.
    #[instrument(skip(self, report), fields(name = %report.name, item_type = %report.item_type))]
    pub async fn report_item(&mut self, report: ItemReport, reporting_user_id: u64) -> Result<String, ServiceError> {
        self.ensure_writable(Collection::Items)?;
        let item_id = self.ids.generate(ITEM_PREFIX, self.items.iter().map(|i| i.item_id.as_str()))?;
        self.items.push(report.into_item(item_id.clone()));
        self.persist_or_undo(|store| {
            store.items.pop();
        })
        .await?;
        info!(event = "item_reported", %item_id, reporter = reporting_user_id, "item reported");
        Ok(item_id)
    }

    /// Items whose name contains `keyword`, ignoring case. An empty keyword
    /// matches everything.
    pub fn search_items(&self, keyword: &str) -> Vec<&ReportedItem> {
        let needle = keyword.to_lowercase();
        self.items.iter().filter(|i| contains_ignore_case(&i.name, &needle)).collect()
    }

    /// Same matching rule as [`search_items`](Self::search_items), applied to the location.
    pub fn search_by_location(&self, location: &str) -> Vec<&ReportedItem> {
        let needle = location.to_lowercase();
        self.items.iter().filter(|i| contains_ignore_case(&i.location, &needle)).collect()
    }

    pub fn items_of_type(&self, kind: &ItemKind) -> Vec<&ReportedItem> {
        self.items.iter().filter(|i| &i.item_type == kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ServiceError;
    use crate::storage::{Collection, CollectionStorage};
    use crate::test_support::memory_store;
    use models::{ItemKind, ItemReport, ItemStatus, ReportedItem};

    #[tokio::test]
    async fn report_appends_one_reported_item() -> Result<(), anyhow::Error> {
        let (storage, mut store) = memory_store().await?;
        let report = ItemReport::new("Blue Backpack", "zipper broken", "Room 204", ItemKind::Lost);
        let id = store.report_item(report.clone(), 2).await?;

        assert!(id.starts_with("ITEM-"));
        assert_eq!(store.items().len(), 1);
        let item = &store.items()[0];
        assert_eq!(item.item_id, id);
        assert_eq!(item.name, report.name);
        assert_eq!(item.description, report.description);
        assert_eq!(item.location, report.location);
        assert_eq!(item.item_type, ItemKind::Lost);
        assert_eq!(item.status, ItemStatus::Reported);

        let persisted: Vec<ReportedItem> = storage.load(Collection::Items).await?;
        assert_eq!(persisted, store.items());
        Ok(())
    }

    #[tokio::test]
    async fn arbitrary_item_type_is_accepted() -> Result<(), anyhow::Error> {
        let (_, mut store) = memory_store().await?;
        store.report_item(ItemReport::new("Pen", "", "Desk", "borrowed"), 3).await?;
        assert_eq!(store.items()[0].item_type, ItemKind::Other("borrowed".into()));
        Ok(())
    }

    #[tokio::test]
    async fn empty_name_is_stored_as_given() -> Result<(), anyhow::Error> {
        let (storage, mut store) = memory_store().await?;
        let id = store.report_item(ItemReport::new("", "d", "l", ItemKind::Lost), 2).await?;

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].item_id, id);
        assert_eq!(store.items()[0].name, "");
        let persisted: Vec<ReportedItem> = storage.load(Collection::Items).await?;
        assert_eq!(persisted, store.items());
        // an empty keyword still finds it
        assert_eq!(store.search_items("").len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn failed_save_rolls_back_the_report() -> Result<(), anyhow::Error> {
        let (storage, mut store) = memory_store().await?;
        store.report_item(ItemReport::new("Mug", "", "Kitchen", ItemKind::Found), 2).await?;

        storage.fail_saves(true);
        let res = store.report_item(ItemReport::new("Hat", "", "Porch", ItemKind::Lost), 2).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].name, "Mug");
        Ok(())
    }

    #[tokio::test]
    async fn generated_ids_are_unique() -> Result<(), anyhow::Error> {
        let (_, mut store) = memory_store().await?;
        for n in 0..50 {
            store.report_item(ItemReport::new(format!("thing {n}"), "", "", ItemKind::Found), 1).await?;
        }
        let mut ids: Vec<&str> = store.items().iter().map(|i| i.item_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        Ok(())
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring_on_name() -> Result<(), anyhow::Error> {
        let (_, mut store) = memory_store().await?;
        for (name, loc) in [("Black Wallet", "Gym"), ("wallet chain", "Library"), ("Phone", "gym lockers")] {
            store.report_item(ItemReport::new(name, "", loc, ItemKind::Lost), 2).await?;
        }

        let names = |items: Vec<&ReportedItem>| items.iter().map(|i| i.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(store.search_items("WALLET")), vec!["Black Wallet", "wallet chain"]);
        assert_eq!(names(store.search_items("one")), vec!["Phone"]);
        assert!(store.search_items("gym").is_empty());
        assert_eq!(store.search_items("").len(), 3);

        assert_eq!(names(store.search_by_location("GYM")), vec!["Black Wallet", "Phone"]);
        assert_eq!(store.search_by_location("").len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn filter_by_item_type() -> Result<(), anyhow::Error> {
        let (_, mut store) = memory_store().await?;
        store.report_item(ItemReport::new("Ring", "", "", ItemKind::Lost), 2).await?;
        store.report_item(ItemReport::new("Glove", "", "", ItemKind::Found), 2).await?;
        store.report_item(ItemReport::new("Scarf", "", "", ItemKind::Found), 2).await?;

        assert_eq!(store.items_of_type(&ItemKind::Lost).len(), 1);
        assert_eq!(store.items_of_type(&ItemKind::Found).len(), 2);
        assert!(store.items_of_type(&ItemKind::Other("donated".into())).is_empty());
        Ok(())
    }
}
