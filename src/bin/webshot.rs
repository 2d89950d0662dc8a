use webshot::browser;
use clap::Parser;
use std::path::PathBuf;

/// Saves a full-page screenshot of a webpage using a headless browser
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// URL of the webpage to capture
    url: String,

    /// Path of the image file to write;
    /// the extension selects the format (png, jpg, webp)
    output_path: PathBuf,
}

fn run(args: &Args) -> browser::Result<()> {

    let browser = browser::Browser::new()?;

    browser.url_to_screenshot(&args.url, &args.output_path)
}

fn main() {

    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    match run(&args) {
        Ok(()) => println!("Screenshot saved to {}", args.output_path.display()),
        Err(err) => {
            eprintln!("Error taking screenshot: {err}");
            std::process::exit(1);
        }
    }
}
