//! Customer directory CLI commands.
//!
//! Read-through listings of the advisor's customers, fetched per
//! invocation from the advisory backend.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use advisorly_core::api::AdvisorApi;
use advisorly_types::customer::{CustomerDetail, CustomerSummary};

use crate::state::AppState;

use super::chat::chart::format_balance;

/// List all customers assigned to the configured advisor.
pub async fn list_customers(state: &AppState, json: bool) -> Result<()> {
    let customers = state
        .conversation
        .api()
        .list_customers(&state.config.advisor_id)
        .await
        .context("Failed to fetch customers")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&customers)?);
        return Ok(());
    }

    if customers.is_empty() {
        println!();
        println!("  {}", style("No customers found for this advisor.").dim());
        println!();
        return Ok(());
    }

    println!();
    println!("{}", customers_table(&customers));
    println!();
    Ok(())
}

/// Show one customer's detail, including accounts and total balance.
pub async fn show_customer(state: &AppState, customer_id: i64, json: bool) -> Result<()> {
    let customer = state
        .conversation
        .api()
        .get_customer(customer_id, &state.config.advisor_id)
        .await
        .with_context(|| format!("Customer {customer_id} not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&customer)?);
        return Ok(());
    }

    print_customer_detail(&customer);
    Ok(())
}

/// Build the customer listing table.
pub fn customers_table(customers: &[CustomerSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Email").fg(Color::White),
        Cell::new("Phone").fg(Color::White),
        Cell::new("Status").fg(Color::White),
    ]);

    for customer in customers {
        let status_cell = if customer.account_status == "active" {
            Cell::new("● active").fg(Color::Green)
        } else {
            Cell::new(format!("○ {}", customer.account_status)).fg(Color::Yellow)
        };

        table.add_row(vec![
            Cell::new(customer.id),
            Cell::new(&customer.name),
            Cell::new(&customer.email),
            Cell::new(customer.phone.as_deref().unwrap_or("-")),
            status_cell,
        ]);
    }

    table
}

fn print_customer_detail(customer: &CustomerDetail) {
    println!();
    println!("  {}", style(&customer.name).cyan().bold());
    println!("  {}  {}", style("Email:").bold(), customer.email);
    println!(
        "  {}  {}",
        style("Phone:").bold(),
        customer.phone.as_deref().unwrap_or("-")
    );
    println!(
        "  {} {}",
        style("Status:").bold(),
        customer.account_status
    );
    println!();

    if customer.accounts.is_empty() {
        println!("  {}", style("No accounts on file.").dim());
    } else {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Account").fg(Color::White),
            Cell::new("Type").fg(Color::White),
            Cell::new("Balance").fg(Color::White),
        ]);
        for account in &customer.accounts {
            table.add_row(vec![
                Cell::new(&account.account_number),
                Cell::new(&account.account_type),
                Cell::new(format!("${}", format_balance(account.balance))),
            ]);
        }
        println!("{table}");
    }

    println!();
    println!(
        "  {} ${}",
        style("Total balance:").bold(),
        format_balance(customer.total_balance)
    );
    println!();
}
