//! # Store Menu
//!
//! The interactive text session: list, total, order, quit.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Menu Session                                    │
//! │                                                                         │
//! │  Welcome ──► ┌──────────────────────┐                                   │
//! │              │ 1. List products     │──► numbered active products       │
//! │              │ 2. Total quantity    │──► Store::total_quantity()        │
//! │              │ 3. Make an order     │──► collect lines ──► checkout()   │
//! │              │ 4. Quit              │──► goodbye                        │
//! │              └──────────────────────┘                                   │
//! │                     ▲        │                                          │
//! │                     └────────┘  anything else: show the menu again      │
//! │                                                                         │
//! │  End of input at any prompt ends the session like "4".                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so a whole session can be scripted in tests.

use std::io::{BufRead, Write};
use tracing::{debug, info};

use stockroom_core::{OrderLine, ProductId, Store};

use crate::error::CliResult;

/// Menu choices, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListProducts,
    TotalQuantity,
    MakeOrder,
    Quit,
}

impl MenuChoice {
    /// Maps the number typed at the menu prompt.
    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(MenuChoice::ListProducts),
            2 => Some(MenuChoice::TotalQuantity),
            3 => Some(MenuChoice::MakeOrder),
            4 => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// A running store front over one store.
pub struct Menu<R, W> {
    store: Store,
    store_name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: Store, store_name: impl Into<String>, input: R, output: W) -> Self {
        Menu {
            store,
            store_name: store_name.into(),
            input,
            output,
        }
    }

    /// Hands back the store, e.g. to inspect stock after a scripted session.
    pub fn into_store(self) -> Store {
        self.store
    }

    /// Runs the session until the user quits or input ends.
    pub fn run(&mut self) -> CliResult<()> {
        writeln!(self.output, "\nWelcome to {}!", self.store_name)?;

        loop {
            self.show_menu()?;

            let Some(answer) = self.prompt("\nWhat would you like to do? (1-4): ")? else {
                break;
            };

            let Ok(number) = answer.parse::<i64>() else {
                writeln!(self.output, "Invalid input! Try that again")?;
                continue;
            };

            match MenuChoice::from_number(number) {
                Some(MenuChoice::ListProducts) => self.list_products()?,
                Some(MenuChoice::TotalQuantity) => self.show_total_quantity()?,
                Some(MenuChoice::MakeOrder) => self.make_order()?,
                Some(MenuChoice::Quit) => break,
                None => continue,
            }

            self.press_to_continue()?;
        }

        self.exit_message()
    }

    fn show_menu(&mut self) -> CliResult<()> {
        writeln!(self.output, "\n---Store Menu---\n")?;
        writeln!(self.output, "1. List all products in store")?;
        writeln!(self.output, "2. Show total amount in store")?;
        writeln!(self.output, "3. Make an order")?;
        writeln!(self.output, "4. Quit")?;
        Ok(())
    }

    fn list_products(&mut self) -> CliResult<()> {
        let lines: Vec<String> = self
            .store
            .list_active_products()
            .iter()
            .enumerate()
            .map(|(index, product)| format!("{}. -- {}", index + 1, product))
            .collect();

        if lines.is_empty() {
            writeln!(self.output, "All products are out of stock or unavailable")?;
        }
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn show_total_quantity(&mut self) -> CliResult<()> {
        let total = self.store.total_quantity();
        writeln!(self.output, "Total amount in store: {} items", total)?;
        Ok(())
    }

    /// Collects order lines until the user enters 0 (or input ends), then
    /// submits them as one order.
    fn make_order(&mut self) -> CliResult<()> {
        // Numbers refer to this snapshot; the store is not touched until checkout
        let choices: Vec<(ProductId, String)> = self
            .store
            .list_active_products()
            .iter()
            .map(|p| (p.id(), p.name().to_string()))
            .collect();

        if choices.is_empty() {
            writeln!(self.output, "Out of luck! No products are available at the moment")?;
            return Ok(());
        }

        let mut lines = Vec::new();
        loop {
            self.list_products()?;

            let Some(answer) = self.prompt(
                "\nEnter the product number you'd like to buy (or 0 to stop): ",
            )?
            else {
                break;
            };

            let Ok(number) = answer.parse::<usize>() else {
                writeln!(self.output, "Please enter a valid number")?;
                continue;
            };
            if number == 0 {
                break;
            }
            let Some((product_id, name)) = choices.get(number - 1).cloned() else {
                writeln!(self.output, "Invalid product number.")?;
                continue;
            };

            let Some(answer) =
                self.prompt(&format!("Please enter the wished quantity for {}: ", name))?
            else {
                break;
            };
            match answer.parse::<i64>() {
                Ok(quantity) => lines.push(OrderLine::new(product_id, quantity)),
                Err(_) => writeln!(self.output, "Please enter a valid number")?,
            }
        }

        if lines.is_empty() {
            writeln!(self.output, "Looks like you changed your mind")?;
            return Ok(());
        }

        debug!(lines = lines.len(), "Submitting order");
        match self.store.checkout(&lines) {
            Ok(receipt) => {
                for line in &receipt.lines {
                    writeln!(
                        self.output,
                        "  {} x {}: {}",
                        line.quantity, line.name, line.charge
                    )?;
                }
                writeln!(self.output, "Total order price amount: {}", receipt.total)?;
                writeln!(
                    self.output,
                    "Order placed at {}",
                    receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC")
                )?;
            }
            Err(e) => {
                info!(error = %e, "Order rejected");
                writeln!(self.output, "Oops! {}. Please try that again", e)?;
            }
        }

        Ok(())
    }

    fn press_to_continue(&mut self) -> CliResult<()> {
        writeln!(self.output)?;
        self.prompt("Press enter to continue...")?;
        writeln!(self.output)?;
        Ok(())
    }

    fn exit_message(&mut self) -> CliResult<()> {
        writeln!(self.output, "\nThank you for using {}!", self.store_name)?;
        writeln!(self.output, "Have a nice day!")?;
        Ok(())
    }

    /// Prints `message` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
