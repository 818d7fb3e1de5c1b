use anyhow::Result;
use compiler_cminus_tm::driver::driver_main;

fn main() -> Result<()> {
    driver_main()
}
