//! Command line tool for aligning relation spans with tokens

use anyhow::anyhow;
use log::info;
use pico_args::Arguments;
use tokio::io::AsyncWriteExt;
use span_aligner::{
    datasets::{relations, LoadableDataset},
    pipelines::relation_extraction::{align, Config},
    tokenization::Pretrained,
    utils::files::{line_writer, write_lines},
};

const HELP: &str = "\
Usage: align TOKENIZER INPUT [OPTIONS]

Arguments:
  TOKENIZER              A tokenizer.json path or a Hugging Face model name (e.g., 'bert-base-cased')
  INPUT                  A JSON lines file with text and character spans

Options:
  -h, --help             Print help
  -o, --output           Write aligned records here instead of stdout
  -c, --config           A JSON config file
  -b, --batch-size       Batch size
  -m, --max-seq-length   Truncate encodings to this many tokens
";

#[derive(Debug)]
struct Args {
    tokenizer: String,
    input: String,
    output: Option<String>,
    config: Option<String>,
    batch_size: Option<usize>,
    max_seq_length: Option<usize>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            output: pargs.opt_value_from_str(["-o", "--output"])?,
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            max_seq_length: pargs.opt_value_from_str(["-m", "--max-seq-length"])?,
            tokenizer: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: TOKENIZER"),
                _ => anyhow!("{}", e),
            })?,
            input: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: INPUT"),
                _ => anyhow!("{}", e),
            })?,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }

    /// Load the config file if given, then apply any overrides from the command line
    async fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).await?,
            None => Config::default(),
        };

        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }

        if let Some(max_seq_length) = self.max_seq_length {
            config.max_seq_length = Some(max_seq_length);
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.config().await?;
    let tokenizer = Pretrained::load(&args.tokenizer, &config).await?;
    let dataset = relations::Dataset::load(&args.input).await?;

    let mut output = line_writer(args.output.as_deref()).await?;
    let (mut samples, mut retained) = (0, 0);

    for batch in dataset.batches(config.batch_size) {
        let aligned = align(&batch, &tokenizer)?;
        samples += aligned.len();
        retained += aligned.num_retained();

        let lines = aligned
            .into_records()
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;

        write_lines(&mut output, &lines).await?;
    }

    output.flush().await?;

    info!(
        "Aligned {} samples with {} retained candidates",
        samples, retained
    );

    Ok(())
}
