use buildinfo_cmake::{check_compiler, CMakeGenerator, CompilerCheck, DetectedCompiler, Generator};
use buildinfo_model::{BuildInfoFile, CompilerExpectation, CompilerVendor};
use clap::{Parser, Subcommand};
use miette::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "buildinfo")]
#[command(author, version, about = "Generate CMake build info for resolved dependencies")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render conanbuildinfo.cmake from a build info document
    Generate {
        /// Build info document (.toml or .json)
        input: PathBuf,

        /// Directory to write conanbuildinfo.cmake into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Print the rendered file instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Check a declared compiler against the one a build system detected
    CheckCompiler {
        /// Declared compiler (gcc, clang, apple-clang, "Visual Studio", ...);
        /// without it nothing is checked
        #[arg(long, requires = "compiler_version")]
        compiler: Option<String>,

        /// Declared compiler version
        #[arg(long, requires = "compiler")]
        compiler_version: Option<String>,

        /// Detected compiler id (CMAKE_CXX_COMPILER_ID)
        #[arg(long)]
        detected_id: String,

        /// Detected compiler version (CMAKE_CXX_COMPILER_VERSION)
        #[arg(long)]
        detected_version: String,

        /// The detecting host is an Apple platform
        #[arg(long)]
        apple: bool,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output_dir,
            stdout,
        } => {
            let content = generate(&input)?;

            if stdout {
                print!("{}", content);
            } else {
                let path = write_build_info(&output_dir, &content)?;
                println!("Wrote {}", path.display());
            }
        }

        Commands::CheckCompiler {
            compiler,
            compiler_version,
            detected_id,
            detected_version,
            apple,
        } => {
            let declared = compiler
                .zip(compiler_version)
                .map(|(name, version)| {
                    CompilerExpectation::new(CompilerVendor::from_name(&name), version)
                });
            let detected = DetectedCompiler::new(detected_id, detected_version).on_apple(apple);

            println!("{}", check_summary(declared.as_ref(), &detected)?);
        }
    }

    Ok(())
}

/// Run the compiler check and describe a passing outcome.
fn check_summary(
    declared: Option<&CompilerExpectation>,
    detected: &DetectedCompiler,
) -> Result<String> {
    let summary = match (check_compiler(declared, detected)?, declared) {
        (CompilerCheck::VersionSkipped, None) => {
            "Skipping compiler checking, no compiler declared...".to_string()
        }
        (CompilerCheck::VersionSkipped, Some(_)) => {
            "Skipping version checking of not detected compiler...".to_string()
        }
        (CompilerCheck::VersionUnmapped, Some(declared)) => format!(
            "{} {}: no MSVC version mapping, version not checked",
            declared.vendor, declared.version
        ),
        (_, Some(declared)) => format!("{} {}: OK", declared.vendor, declared.version),
        (_, None) => "OK".to_string(),
    };
    Ok(summary)
}

/// Install the stderr subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load, validate and render a build info document.
fn generate(input: &Path) -> Result<String> {
    let file = BuildInfoFile::from_file(input)
        .map_err(|e| miette::miette!("Failed to load {}: {}", input.display(), e))?;
    let (build_info, settings) = file
        .into_build_info()
        .map_err(|e| miette::miette!("Invalid build info in {}: {}", input.display(), e))?;

    tracing::info!(
        dependencies = ?build_info.dependency_names().collect::<Vec<_>>(),
        "rendering build info"
    );

    Ok(CMakeGenerator::new(&build_info)
        .with_settings(&settings)
        .content())
}

/// Write the rendered file into `output_dir`, creating it if needed.
fn write_build_info(output_dir: &Path, content: &str) -> Result<PathBuf> {
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir)
            .map_err(|e| miette::miette!("Failed to create output directory: {}", e))?;
    }

    let path = output_dir.join(buildinfo_cmake::BUILD_INFO_CMAKE);
    std::fs::write(&path, content)
        .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;

    tracing::info!(path = %path.display(), bytes = content.len(), "wrote build info");
    Ok(path)
}
