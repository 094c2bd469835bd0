use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    order_nest::cli::run_order_nest(std::env::args().skip(1))
}
