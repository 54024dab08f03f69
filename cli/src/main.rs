use anyhow::Result;

fn main() -> Result<()> {
    pubfile_cli::run()
}
