use std::process::exit;

use mobilenig_client::config::options_from_env;
use mobilenig_client::{CancellationToken, Client, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Credentials and environment come from MOBILENIG_* variables,
    // the smartcard number from the first argument
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <smartcard_number> [transaction_id]", args[0]);
        exit(1);
    }

    let client = Client::new(options_from_env());
    println!(
        "Using {} ({})",
        client.base_url(),
        client.environment()
    );

    let cancel = CancellationToken::new();
    let bills = client.bills();

    match bills.check_dstv_user(&cancel, &args[1]).await {
        Ok(user) => {
            let details = &user.details;
            println!(
                "Subscriber {} {}: status={} due={}",
                details.first_name, details.last_name, details.account_status, details.due_date
            );

            let package = bills
                .get_dstv_package(&cancel, details.customer_number)
                .await?;
            println!("Current package: {}", package.as_deref().unwrap_or("<none>"));
        }
        Err(err) => {
            if let Some(api_error) = err.api_error() {
                eprintln!("API rejected request: {} ({})", api_error.description, api_error.code);
            }
            return Err(err);
        }
    }

    if let Some(transaction_id) = args.get(2) {
        let transaction = bills.query_dstv(&cancel, transaction_id).await?;
        println!(
            "Transaction {}: {} {} balance={}",
            transaction.transaction_id,
            transaction.details.status,
            transaction.details.price,
            transaction.details.balance
        );
    }

    Ok(())
}
