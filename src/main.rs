use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use ecglabel::{ArtifactLabel, DataLayout, LabelError, LabelStore, Result, DEFAULT_DATA_ROOT};

#[derive(Parser, Debug)]
#[command(name = "ecg-label", version, about = "Manual artifact labeling of segmented ECG recordings")]
struct CliArgs {
    /// Recording file name, e.g. s01_1_klud.csv
    recording: String,

    /// Sampling rate of the recording in Hz
    #[arg(short = 'f', long, default_value_t = 500)]
    sampling_rate: u32,

    /// Segment length in seconds
    #[arg(short = 's', long, default_value_t = 10)]
    segment_length: u32,

    /// Root directory holding one folder per subject
    #[arg(long, env = "ECG_LABEL_DATA_ROOT", default_value = DEFAULT_DATA_ROOT)]
    data_root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the recording metadata and the whole label table
    Show,

    /// Prints the artifact code of a segment, filling in 0 if it is unset
    Get { index: usize },

    /// Sets the artifact code of a segment (0, 1 or 2)
    Set { index: usize, label: i64 },

    /// Prints the resolved file locations without loading anything
    Paths,
}

fn run(args: CliArgs) -> Result<()> {
    let layout = DataLayout::new(&args.data_root);

    if let Command::Paths = args.command {
        let paths = layout.resolve(&args.recording, args.segment_length);
        println!("recording: {}", paths.recording_file.display());
        println!("labels:    {}", paths.label_file.display());
        return Ok(());
    }

    let mut store = LabelStore::open(
        &layout,
        &args.recording,
        args.sampling_rate,
        args.segment_length,
    )?;

    match args.command {
        Command::Show => {
            println!("Recording: {}", store.recording_id());
            println!("Samples:   {}", store.recording().len());
            println!("Activity:  {}", store.activity().label());
            let electrode = store.electrode().map(|e| e.label()).unwrap_or("Unknown");
            println!("Electrode: {}", electrode);
            println!("Segments:  {}", store.len());
            print!("{}", store.table());
        }
        Command::Get { index } => {
            println!("{}", store.get_artifact(index)?);
        }
        Command::Set { index, label } => {
            store.set_artifact(index, ArtifactLabel::try_from(label)?)?;
        }
        Command::Paths => {}
    }

    Ok(())
}

fn report(e: &LabelError) {
    match e {
        LabelError::IndexOutOfRange { .. } | LabelError::InvalidArtifactLabel(_) => {
            eprintln!("Rejected: {}", e)
        }
        _ => eprintln!("Error: {}", e),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    if let Err(e) = run(args) {
        report(&e);
        process::exit(e.exit_code());
    }
}
