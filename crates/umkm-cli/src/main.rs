use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use umkm_listing::{FacetName, SortSpec};

mod list;
mod show;

#[derive(Debug, Parser)]
#[command(name = "umkm-cli")]
#[command(about = "UMKM business directory command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print one page of business cards.
    List(ListArgs),
    /// Print every value a facet can be filtered on.
    Facets {
        /// `category`, `type`, `payment`, `delivery` or `year`.
        facet: FacetName,
    },
    /// Print one business and preview its map marker.
    Show {
        id: u32,
    },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Fuzzy search over name, category, type and owner.
    #[arg(long, short)]
    query: Option<String>,

    #[arg(long = "category")]
    categories: Vec<String>,

    #[arg(long = "type")]
    business_types: Vec<String>,

    #[arg(long = "payment")]
    payment_methods: Vec<String>,

    #[arg(long = "delivery")]
    delivery_methods: Vec<String>,

    #[arg(long = "year")]
    founding_years: Vec<String>,

    #[arg(long, default_value_t = 0.0)]
    min_rating: f64,

    /// `key` or `key:asc` / `key:desc`, e.g. `rating:desc`.
    #[arg(long)]
    sort: Option<SortSpec>,

    /// 1-based page number.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Overrides `UMKM_PAGE_SIZE`.
    #[arg(long)]
    page_size: Option<usize>,

    /// Emit the page as JSON instead of cards.
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn selections(&self) -> [(FacetName, &[String]); FacetName::COUNT] {
        [
            (FacetName::Category, self.categories.as_slice()),
            (FacetName::BusinessType, self.business_types.as_slice()),
            (FacetName::PaymentMethod, self.payment_methods.as_slice()),
            (FacetName::DeliveryMethod, self.delivery_methods.as_slice()),
            (FacetName::FoundingYear, self.founding_years.as_slice()),
        ]
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = umkm_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let directory = umkm_core::load_directory(&config.data_path)?;

    match cli.command {
        Some(Commands::List(args)) => list::run_list(&config, directory.businesses, &args)?,
        Some(Commands::Facets { facet }) => list::run_facets(directory.businesses, facet),
        Some(Commands::Show { id }) => show::run_show(&config, &directory.businesses, id)?,
        None => println!(
            "umkm-cli: {} businesses loaded from {} ({})",
            directory.businesses.len(),
            config.data_path.display(),
            config.env
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
