pub mod cli;
mod render;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::oneshot;

use cli::{ChoiceError, Cli, Command, is_yes, parse_choice};
use common::config::AppConfig;
use common::logger::init_logger;
use engine::{Signal, derive_signal};
use market::coingecko::CoinGeckoClient;
use market::{AssetSnapshot, MarketDataProvider, MarketSnapshotProvider};
use tracker::{StopReason, TrackRequest, Tracker};

type Provider = MarketSnapshotProvider<CoinGeckoClient>;

struct App {
    cfg: AppConfig,
    provider: Arc<Provider>,
    tracker: Tracker<Provider>,
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = cli.apply(AppConfig::from_env());

    init_logger("signals", cfg.json_logs);

    let client = CoinGeckoClient::new(cfg.coingecko_base_url.clone(), cfg.http_timeout)
        .context("failed to build http client")?;
    let provider = Arc::new(MarketSnapshotProvider::new(client, cfg.pinned_assets.clone()));
    let tracker = Tracker::new(Arc::clone(&provider), cfg.poll_interval);

    tracing::info!(
        base_url = %cfg.coingecko_base_url,
        limit = cfg.list_limit,
        every_s = cfg.poll_interval.as_secs(),
        "starting signals"
    );

    let app = App {
        cfg,
        provider,
        tracker,
        json: cli.json,
    };

    match cli.command {
        None => app.interactive().await,
        Some(Command::List) => app.list().await,
        Some(Command::Signal { id, track }) => app.signal(&id, track).await,
    }
}

impl App {
    async fn list(&self) -> anyhow::Result<()> {
        let assets = self.provider.list_top_assets(self.cfg.list_limit).await;
        if assets.is_empty() {
            bail!("no data: unable to fetch coin listing");
        }

        self.print_listing(&assets);
        Ok(())
    }

    async fn signal(&self, id: &str, track: bool) -> anyhow::Result<()> {
        let Some(snapshot) = self.provider.asset_by_id(id).await else {
            bail!("no data for asset {id}");
        };

        let signal = derive_signal(&snapshot);
        self.print_signal(&signal)?;

        if track {
            self.track(&signal, &snapshot).await?;
        }

        Ok(())
    }

    /// Menu loop: list, pick, signal, optionally track, back to the list.
    async fn interactive(&self) -> anyhow::Result<()> {
        let mut input = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let assets = self.provider.list_top_assets(self.cfg.list_limit).await;
            if assets.is_empty() {
                println!("❌ Unable to fetch coin data.");
                return Ok(());
            }

            println!("\n📊 Available Coins (Top {} + pinned):", self.cfg.list_limit);
            self.print_listing(&assets);

            let question = "\n📥 Select coin number to generate signal: ";
            let Some(line) = prompt(&mut input, question).await? else {
                return Ok(());
            };

            let index = match parse_choice(&line, assets.len()) {
                Ok(i) => i,
                Err(ChoiceError::OutOfRange) => {
                    println!("❌ Invalid choice.");
                    continue;
                }
                Err(ChoiceError::NotANumber) => {
                    println!("❌ Invalid input.");
                    continue;
                }
            };

            let snapshot = &assets[index];
            let signal = derive_signal(snapshot);
            println!();
            self.print_signal(&signal)?;

            let question = format!(
                "\nWould you like to track the price every {}s? (yes/no): ",
                self.cfg.poll_interval.as_secs()
            );
            let Some(answer) = prompt(&mut input, &question).await? else {
                return Ok(());
            };

            if is_yes(&answer) {
                if let Err(e) = self.track(&signal, snapshot).await {
                    println!("❌ {e:#}");
                }
            }

            println!("\n🔄 Returning to coin list...");
        }
    }

    /// Track until the provider fails or the user hits Ctrl-C.
    async fn track(
        &self,
        signal: &Signal,
        snapshot: &AssetSnapshot,
    ) -> anyhow::Result<StopReason> {
        let json = self.json;
        let (stop_tx, mut stop_rx) = oneshot::channel();

        let handle = self.tracker.start(
            TrackRequest::from_signal(signal, snapshot),
            move |report| {
                if json {
                    match serde_json::to_string(&report) {
                        Ok(line) => println!("{line}"),
                        Err(e) => tracing::warn!(error = %e, "failed to encode report"),
                    }
                } else {
                    println!("\n{}", render::report_block(&report));
                }
            },
            move |reason| {
                let _ = stop_tx.send(reason);
            },
        )?;

        println!(
            "👀 Tracking {} every {}s, press Ctrl-C to stop.",
            signal.symbol,
            self.tracker.interval().as_secs()
        );

        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res.context("failed to listen for Ctrl-C")?;
                handle.cancel();
            }
            _ = &mut stop_rx => {}
        }

        let reason = handle.stopped().await;
        println!("{}", render::stop_line(reason));

        Ok(reason)
    }

    fn print_listing(&self, assets: &[AssetSnapshot]) {
        for (i, asset) in assets.iter().enumerate() {
            println!("{}", render::asset_line(i, asset));
        }
    }

    fn print_signal(&self, signal: &Signal) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(signal)?);
        } else {
            println!("{}", render::signal_block(signal));
        }
        Ok(())
    }
}

/// `None` on end of input or Ctrl-C.
async fn prompt(
    input: &mut Lines<BufReader<Stdin>>,
    question: &str,
) -> anyhow::Result<Option<String>> {
    print!("{question}");
    std::io::stdout().flush()?;

    tokio::select! {
        line = input.next_line() => Ok(line?),
        res = tokio::signal::ctrl_c() => {
            res.context("failed to listen for Ctrl-C")?;
            println!();
            Ok(None)
        }
    }
}
