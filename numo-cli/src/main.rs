mod cli;

#[snafu::report]
fn main() -> Result<(), numo_json::Error> {
    let cli = cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::ERROR)
        .init();

    let document = numo_json::load_document(&cli.filename)?;
    println!("{:#?}", document.root());

    Ok(())
}
