use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "provenance-chain")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "register-manufacturer",
        about = "Register a manufacturer and generate its key pair"
    )]
    RegisterManufacturer {
        #[arg(help = "Manufacturer name (unique key)")]
        name: String,
    },
    #[command(
        name = "submit",
        about = "Queue a product registration for the next block"
    )]
    Submit {
        #[arg(help = "Product name")]
        product_name: String,
        #[arg(help = "Manufacturer name (auto-registered if unseen)")]
        manufacturer: String,
        #[arg(help = "Batch number")]
        batch_number: String,
        #[arg(help = "Manufacture date, e.g. 2025-01-01")]
        manufacture_date: String,
        #[arg(long, help = "Queue without a manufacturer signature")]
        unsigned: bool,
        #[arg(long, help = "Mine the pending pool immediately after queueing")]
        mine: bool,
    },
    #[command(name = "mine", about = "Seal pending transactions into a new block")]
    Mine,
    #[command(name = "validate", about = "Re-verify every chain invariant")]
    Validate,
    #[command(name = "verify", about = "Look up a product id in the chain")]
    Verify {
        #[arg(help = "Product id returned by submit")]
        product_id: String,
    },
    #[command(name = "list-products", about = "List every product on the chain")]
    ListProducts,
    #[command(name = "list-manufacturers", about = "List registered manufacturers")]
    ListManufacturers,
    #[command(name = "block", about = "Print one block by index")]
    Block {
        #[arg(help = "0-based block index")]
        index: usize,
    },
    #[command(name = "stats", about = "Print chain statistics")]
    Stats,
}
