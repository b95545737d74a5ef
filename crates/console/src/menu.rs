//! User, search and admin menus.

use std::io;

use models::{ItemKind, ItemReport, ReportedItem, User};
use service::storage::CollectionStorage;
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::render::{capitalize, claim_line, item_line, item_line_without_type};
use crate::session::{Flow, Session};

impl<'a, S, R, W> Session<'a, S, R, W>
where
    S: CollectionStorage,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub(crate) async fn user_menu(&mut self, user: &User) -> io::Result<Flow> {
        loop {
            self.say("\n--- User Menu ---").await?;
            self.say("1. Report Lost Item").await?;
            self.say("2. Report Found Item").await?;
            self.say("3. Search Items").await?;
            self.say("4. Claim an Item").await?;
            self.say("5. Logout").await?;
            let Some(choice) = self.prompt("Choose an option: ").await? else { return Ok(Flow::Quit) };

            let flow = match choice.trim() {
                "1" => self.report(user, ItemKind::Lost).await?,
                "2" => self.report(user, ItemKind::Found).await?,
                "3" => self.search_menu().await?,
                "4" => self.claim(user).await?,
                "5" => return Ok(Flow::Back),
                _ => {
                    self.say("Invalid option.").await?;
                    Flow::Back
                }
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    async fn report(&mut self, user: &User, kind: ItemKind) -> io::Result<Flow> {
        let Some(name) = self.prompt("Item name: ").await? else { return Ok(Flow::Quit) };
        let Some(description) = self.prompt("Description: ").await? else { return Ok(Flow::Quit) };
        let Some(location) = self.prompt("Location: ").await? else { return Ok(Flow::Quit) };

        let label = capitalize(kind.as_str());
        match self.store.report_item(ItemReport::new(name, description, location, kind), user.id).await {
            Ok(item_id) => self.say(&format!("{label} item reported. Item ID: {item_id}")).await?,
            Err(e) => self.report_failure(e).await?,
        }
        Ok(Flow::Back)
    }

    async fn claim(&mut self, user: &User) -> io::Result<Flow> {
        let Some(item_id) = self.prompt("Enter Item ID to claim: ").await? else { return Ok(Flow::Quit) };
        match self.store.file_claim(user.id, item_id.trim()).await {
            Ok(claim_id) => self.say(&format!("Claim submitted. Claim ID: {claim_id}")).await?,
            Err(e) => self.report_failure(e).await?,
        }
        Ok(Flow::Back)
    }

    async fn search_menu(&mut self) -> io::Result<Flow> {
        self.say("\n--- Search Menu ---").await?;
        self.say("1. View All Items").await?;
        self.say("2. Search by Keyword").await?;
        self.say("3. Search by Location").await?;
        self.say("4. Search by Item Type").await?;
        let Some(choice) = self.prompt("Choose an option: ").await? else { return Ok(Flow::Quit) };

        match choice.trim() {
            "1" => {
                let lines = render_all(self.store.items().iter(), item_line);
                self.print_results("--- All Items ---", lines, "No items in the system.").await?;
            }
            "2" => {
                let Some(keyword) = self.prompt("Enter keyword: ").await? else { return Ok(Flow::Quit) };
                let lines = render_all(self.store.search_items(&keyword), item_line);
                self.print_results("--- Search Results ---", lines, "No items found with that keyword.").await?;
            }
            "3" => {
                let Some(location) = self.prompt("Enter location: ").await? else { return Ok(Flow::Quit) };
                let lines = render_all(self.store.search_by_location(&location), item_line);
                self.print_results("--- Items Found in Location ---", lines, "No items found in that location.")
                    .await?;
            }
            "4" => {
                self.say("Choose type: 1 for Lost, 2 for Found").await?;
                let Some(pick) = self.prompt("Enter choice: ").await? else { return Ok(Flow::Quit) };
                let kind = if pick.trim() == "1" { ItemKind::Lost } else { ItemKind::Found };
                let lines = render_all(self.store.items_of_type(&kind), item_line_without_type);
                let heading = format!("--- {} Items ---", capitalize(kind.as_str()));
                let empty = format!("No {kind} items found.");
                self.print_results(&heading, lines, &empty).await?;
            }
            _ => self.say("Invalid option.").await?,
        }
        Ok(Flow::Back)
    }

    pub(crate) async fn admin_menu(&mut self, _admin: &User) -> io::Result<Flow> {
        loop {
            self.say("\n--- Admin Menu ---").await?;
            self.say("1. Approve Claim").await?;
            self.say("2. View Claims").await?;
            self.say("3. Logout").await?;
            let Some(choice) = self.prompt("Choose an option: ").await? else { return Ok(Flow::Quit) };

            match choice.trim() {
                "1" => {
                    let Some(claim_id) = self.prompt("Enter Claim ID: ").await? else { return Ok(Flow::Quit) };
                    match self.store.approve_claim(claim_id.trim()).await {
                        Ok(true) => self.say("Claim approved.").await?,
                        Ok(false) => self.say("Claim not found.").await?,
                        Err(e) => self.report_failure(e).await?,
                    }
                }
                "2" => {
                    let lines: Vec<String> = self.store.claims().iter().map(claim_line).collect();
                    self.print_results("--- Claims ---", lines, "No claims in the system.").await?;
                }
                "3" => return Ok(Flow::Back),
                _ => self.say("Invalid option.").await?,
            }
        }
    }

    async fn print_results(&mut self, heading: &str, lines: Vec<String>, empty: &str) -> io::Result<()> {
        if lines.is_empty() {
            return self.say(empty).await;
        }
        self.say(&format!("\n{heading}")).await?;
        for line in &lines {
            self.say(line).await?;
        }
        Ok(())
    }
}

/// Render before printing so the store borrow ends before output starts.
fn render_all<'i, I>(items: I, line: fn(&ReportedItem) -> String) -> Vec<String>
where
    I: IntoIterator<Item = &'i ReportedItem>,
{
    items.into_iter().map(line).collect()
}
