use std::process::ExitCode;

use gallery::ctl::driver;

#[tokio::main]
async fn main() -> ExitCode {
    driver::run().await
}
