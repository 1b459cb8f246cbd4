use clap::{Args, Parser, Subcommand};
use oncoxtract::config::PipelineConfig;
use oncoxtract::error::ConstructionError;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "oncoxtract")]
#[command(about = "Flattens clinical-genomics reports and writes oncoprint artifacts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[arg(short, long, global = true, help = "Log per-record details")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct Dirs {
    #[arg(
        short = 'd',
        long = "data-dir",
        value_name = "DIR",
        default_value = "data",
        help = "Directory holding the flat CSV tables"
    )]
    pub data_dir: PathBuf,

    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = "data/oncoprinter",
        help = "Directory the artifacts are written to"
    )]
    pub output_dir: PathBuf,
}

impl Dirs {
    fn config(self) -> PipelineConfig {
        PipelineConfig::new(self.data_dir, self.output_dir)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Flatten a combined report document into CSV tables.
    Extract {
        #[arg(short, long, value_name = "PATH", help = "Combined report JSON")]
        reports: PathBuf,
        #[command(flatten)]
        dirs: Dirs,
    },
    /// Write the alteration matrix.
    Oncoprint {
        #[command(flatten)]
        dirs: Dirs,
        #[arg(long, help = "Only include patients whose diagnosis contains this text")]
        diagnosis: Option<String>,
        #[arg(long, default_value_t = oncoxtract::constants::DEFAULT_AMPLIFICATION_THRESHOLD)]
        amplification_threshold: f64,
        #[arg(long, default_value = "all.txt")]
        file_name: String,
    },
    /// Write the clinical tracks.
    Clinical {
        #[command(flatten)]
        dirs: Dirs,
        #[arg(long, default_value = "clinical_data.txt")]
        file_name: String,
    },
    /// Write validated mutation-map tables.
    MutationMap {
        #[command(flatten)]
        dirs: Dirs,
        #[arg(short, long, value_delimiter = ',', help = "Genes to include, comma separated")]
        genes: Vec<String>,
        #[arg(long, help = "Put all genes into a single file")]
        one_file: bool,
    },
    /// Count genes of an alteration matrix in the output directory.
    GeneCounts {
        #[command(flatten)]
        dirs: Dirs,
        #[arg(long, default_value = "all.txt", help = "Matrix file name")]
        matrix: String,
        #[arg(long, default_value = "gene_counts.csv")]
        file_name: String,
    },
    /// Run every step described by a config file.
    Run {
        #[arg(short, long, value_name = "PATH")]
        config: PathBuf,
    },
}

/// The pipeline step a command executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Extract,
    Oncoprint,
    Clinical,
    MutationMap,
    GeneCounts,
    Run,
}

impl Command {
    pub fn step(&self) -> Step {
        match self {
            Command::Extract { .. } => Step::Extract,
            Command::Oncoprint { .. } => Step::Oncoprint,
            Command::Clinical { .. } => Step::Clinical,
            Command::MutationMap { .. } => Step::MutationMap,
            Command::GeneCounts { .. } => Step::GeneCounts,
            Command::Run { .. } => Step::Run,
        }
    }

    /// Single-step commands are configured from their arguments, `run` from its file.
    pub fn config(self) -> Result<PipelineConfig, ConstructionError> {
        let config = match self {
            Command::Extract { reports, dirs } => dirs.config().with_reports(reports),
            Command::Oncoprint {
                dirs,
                diagnosis,
                amplification_threshold,
                file_name,
            } => {
                let mut config = dirs.config();
                config.oncoprint.diagnosis_filter = diagnosis;
                config.oncoprint.file_name = file_name;
                config.classification.amplification_threshold = amplification_threshold;
                config
            }
            Command::Clinical { dirs, file_name } => {
                let mut config = dirs.config();
                config.clinical.file_name = file_name;
                config
            }
            Command::MutationMap {
                dirs,
                genes,
                one_file,
            } => {
                let mut config = dirs.config();
                config.mutation_map.genes = genes;
                config.mutation_map.one_file = one_file;
                config
            }
            Command::GeneCounts {
                dirs,
                matrix,
                file_name,
            } => {
                let mut config = dirs.config();
                config.oncoprint.file_name = matrix;
                config.gene_counts.file_name = file_name;
                config
            }
            Command::Run { config } => PipelineConfig::try_from(config)?,
        };
        Ok(config)
    }
}
