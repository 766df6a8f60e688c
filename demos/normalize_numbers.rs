use nextsms::{DEFAULT_REGION, normalize_numbers};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        eprintln!("usage: normalize_numbers <number>...");
        return Ok(());
    }

    for number in normalize_numbers(args, DEFAULT_REGION)? {
        println!("{}", number.raw());
    }

    Ok(())
}
