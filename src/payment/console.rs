//! Interactive mock payment dialogs
//!
//! Card numbers are only length-checked (4 digits for credit, 6 for
//! debit) and nothing is ever charged for real. Three wrong CVV entries
//! decline the payment.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use std::io::Write;
use tracing::info;

use crate::payment::{PaymentGateway, PaymentMethod, PaymentOutcome};

const CREDIT_CARD_DIGITS: usize = 4;
const DEBIT_CARD_DIGITS: usize = 6;
const CVV_DIGITS: usize = 3;
const CVV_ATTEMPTS: u32 = 3;

/// Gateway that walks the user through a mock payment on stdin
#[derive(Debug, Default)]
pub struct ConsoleGateway;

impl ConsoleGateway {
    pub fn new() -> Self {
        Self
    }

    fn card_payment(
        &self,
        label: &str,
        card_digits: usize,
        amount: Decimal,
    ) -> Result<PaymentOutcome> {
        loop {
            let card_number = prompt("\nEnter Card Number: ")?;
            if card_number.len() == card_digits {
                break;
            }
            println!("{}", "Payment failed!! Try Again".bright_red());
        }

        prompt("Enter Card Holder Name: ")?;
        prompt("Enter Expiry Month and Year (MM/YY): ")?;

        for _ in 0..CVV_ATTEMPTS {
            let cvv = prompt("Enter CVV: ")?;
            if cvv.len() == CVV_DIGITS {
                println!(
                    "{}",
                    format!("Paid ${:.2} by {} card.", amount, label).bright_green()
                );
                return Ok(PaymentOutcome::Paid);
            }
            println!("{}", "Enter correct CVV!!".bright_red());
        }

        println!("{}", "\nPayment Failed!!".bright_red());
        println!("{}", "Card blocked for 24 hours!!".bright_red());
        Ok(PaymentOutcome::Declined)
    }

    fn upi_payment(&self, amount: Decimal) -> Result<PaymentOutcome> {
        prompt("\nEnter UPI Id: ")?;
        prompt("Enter UPI pin: ")?;
        println!(
            "{}",
            format!("Paid ${:.2} by UPI.", amount).bright_green()
        );
        Ok(PaymentOutcome::Paid)
    }
}

impl PaymentGateway for ConsoleGateway {
    fn charge(&mut self, method: PaymentMethod, amount: Decimal) -> Result<PaymentOutcome> {
        info!("Charging {} via {}", amount, method);
        let outcome = match method {
            PaymentMethod::Cash => {
                println!(
                    "{}",
                    format!("\nPaid ${:.2} by cash.", amount).bright_green()
                );
                Ok(PaymentOutcome::Paid)
            }
            PaymentMethod::CreditCard => self.card_payment("Credit", CREDIT_CARD_DIGITS, amount),
            PaymentMethod::DebitCard => self.card_payment("Debit", DEBIT_CARD_DIGITS, amount),
            PaymentMethod::Upi => self.upi_payment(amount),
        };
        if let Ok(result) = &outcome {
            info!("Payment result: {:?}", result);
        }
        outcome
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}
