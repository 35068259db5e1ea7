use clap::Parser;

use prosper_listings::{config, ListingScanner};

#[derive(Parser)]
#[clap(version = "0.1")]
struct Opts {
    #[clap(short, long, default_value = "config.toml")]
    config: String,
    /// Query string passed to the listings search, e.g. `biddable=true&sort_by=effective_yield`
    #[clap(short, long)]
    filter: Option<String>,
    /// Print the page as JSON instead of one line per listing
    #[clap(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli_opts: Opts = Opts::parse();
    let conf = config::Config::from_file(cli_opts.config.as_str())?;

    log::debug!("{:?}", conf);

    let scanner = ListingScanner::new(conf)?.with_filter(cli_opts.filter);
    let page = scanner.run()?;

    if cli_opts.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    for l in &page.results {
        println!(
            "{:>10} {:<3} yield={:.4} amount={:.2} remaining={:.2} dti={:.2} prior={} member={}",
            l.listing_number,
            l.prosper_rating,
            l.effective_yield,
            l.listing_amount,
            l.amount_remaining,
            l.dti_wprosper_loan,
            l.prior_prosper_loans,
            l.member_key,
        );
    }
    println!("{} of {} listings", page.results.len(), page.count);

    Ok(())
}
