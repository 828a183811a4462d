//! sourcegen's main application entry point.
//! Parses arguments, loads the project descriptor and drives every
//! blueprint across the module's variants.

use sourcegen::{
    cli::{get_args, Args},
    config::get_config,
    constants::SOURCE_SETS_FILE,
    driver::Driver,
    error::{default_error_handler, Result},
    host::ProjectHost,
    logger::init_logger,
    writer::{generated_files, CodeWriter},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads and validates the project descriptor
/// 2. Resolves the output roots
/// 3. Configures every blueprint and registers its source roots
/// 4. Emits every enabled blueprint for each variant
/// 5. Writes the source-set registrations for the outer build
fn run(args: Args) -> Result<()> {
    let mut config = get_config(&args.project_dir, args.config.as_deref())?;
    if let Some(build_dir) = args.build_dir {
        config.output.build_dir = build_dir;
    }

    let mut host = ProjectHost::new(&args.project_dir, config).select_variants(args.variants);
    let writer = CodeWriter::for_build_dir(host.build_dir());
    let mut driver = Driver::from_config(host.config(), writer);

    let emissions = driver.run(&mut host)?;
    for emission in &emissions {
        for file in generated_files(&emission.dirs)? {
            println!("{} [{}]: '{}'", emission.blueprint, emission.variant, file.display());
        }
    }

    let report = driver.writer().intermediates_output_dir().join(SOURCE_SETS_FILE);
    host.write_source_sets(&report)?;

    println!(
        "Source generation completed successfully in {}.",
        driver.writer().source_output_dir().display()
    );
    Ok(())
}
