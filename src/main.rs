// Main entry point for the ledger CLI. This stands in for the web layer of
// the original deployment: load the persisted ledger (or start fresh), run
// one operation, save after anything that mutated state.
use clap::Parser;
use log::{error, info, LevelFilter};
use provenance_chain::registry::SignatureScheme;
use provenance_chain::storage::{load_from_file, save_to_file};
use provenance_chain::{Command, Ledger, Opt, GLOBAL_CONFIG};
use std::process;

fn main() {
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

/// Load the ledger from the configured file, falling back to a fresh
/// genesis-only ledger when no file exists yet. A malformed file is an
/// error, not a silent fresh start.
fn load_or_create(
    data_file: &str,
    scheme: SignatureScheme,
) -> Result<Ledger, Box<dyn std::error::Error>> {
    match load_from_file(data_file, scheme)? {
        Some(ledger) => Ok(ledger),
        None => {
            info!("No existing ledger found. Starting fresh.");
            Ok(Ledger::with_scheme(GLOBAL_CONFIG.get_difficulty(), scheme)?)
        }
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let scheme: SignatureScheme = GLOBAL_CONFIG.get_signature_scheme().parse()?;
    let data_file = GLOBAL_CONFIG.get_data_file();
    let mut ledger = load_or_create(&data_file, scheme)?;

    match command {
        Command::RegisterManufacturer { name } => {
            let entry = ledger.register_manufacturer(&name)?;
            save_to_file(&ledger, &data_file)?;
            println!("Registered manufacturer: {}", entry.get_name());
            println!("Public key: {}", entry.get_public_key());
        }
        Command::Submit {
            product_name,
            manufacturer,
            batch_number,
            manufacture_date,
            unsigned,
            mine,
        } => {
            // Registration is idempotent; this also fetches the signing key
            let private_key = if unsigned {
                None
            } else {
                let entry = ledger.register_manufacturer(&manufacturer)?;
                Some(entry.get_private_key().to_string())
            };

            let product_id = ledger.submit_transaction(
                &product_name,
                &manufacturer,
                &batch_number,
                &manufacture_date,
                private_key.as_deref(),
            )?;
            println!("Product id: {product_id}");

            if mine {
                match ledger.mine()? {
                    Some(block) => println!(
                        "Sealed block {} with hash {}",
                        block.get_index(),
                        block.get_hash()
                    ),
                    None => println!("Nothing to mine"),
                }
            } else {
                println!("Queued for the next block ({} pending)", ledger.pending_count());
            }
            save_to_file(&ledger, &data_file)?;
        }
        Command::Mine => match ledger.mine()? {
            Some(block) => {
                save_to_file(&ledger, &data_file)?;
                println!(
                    "Sealed block {} with {} transaction(s), hash {}",
                    block.get_index(),
                    block.get_transactions().len(),
                    block.get_hash()
                );
            }
            None => println!("No pending transactions to mine"),
        },
        Command::Validate => {
            let (valid, reason) = ledger.validate();
            if valid {
                println!("Chain is valid");
            } else {
                println!("Chain is INVALID: {reason}");
            }
        }
        Command::Verify { product_id } => match ledger.find_product(&product_id) {
            Some(provenance) => println!("{}", serde_json::to_string_pretty(&provenance)?),
            None => println!("Product not found in the ledger"),
        },
        Command::ListProducts => {
            let products = ledger.list_products();
            println!("{}", serde_json::to_string_pretty(&products)?);
        }
        Command::ListManufacturers => {
            for entry in ledger.list_manufacturers() {
                println!(
                    "{}  public_key={}  registered_at={}",
                    entry.get_name(),
                    entry.get_public_key(),
                    entry.get_registered_at()
                );
            }
        }
        Command::Block { index } => match ledger.get_block_by_index(index) {
            Some(block) => println!("{}", serde_json::to_string_pretty(block)?),
            None => println!("No block at index {index}"),
        },
        Command::Stats => {
            let stats = ledger.stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
