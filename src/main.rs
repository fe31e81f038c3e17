use clap::{arg,crate_version,ArgMatches,Command};
use huffsort::{codes,report,tree_art,FrequencyTable,HuffTree};
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const RCH: &str = "unreachable was reached";

/// Count the input named on the command line and build its tree
fn load(cmd: &ArgMatches) -> Result<(FrequencyTable,HuffTree),Box<dyn std::error::Error>> {
    let path_in = cmd.get_one::<String>("input").expect(RCH);
    let mut opt = match cmd.get_flag("letters") {
        true => huffsort::LETTER_OPTIONS,
        false => huffsort::STD_OPTIONS
    };
    if let Some(offset) = cmd.get_one::<u64>("offset") {
        opt.in_offset = *offset;
    }
    let mut in_file = std::fs::File::open(path_in)?;
    let freq = FrequencyTable::from_reader(&mut in_file,&opt)?;
    let tree = HuffTree::build(&freq)?;
    Ok((freq,tree))
}

fn input_command(name: &'static str,about: &'static str) -> Command {
    Command::new(name)
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-l --letters "count only letters, folded to upper case"))
        .arg(arg!(--offset <BYTES> "starting position in the input").value_parser(clap::value_parser!(u64)))
        .about(about)
}

fn main() -> STDRESULT
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let long_help =
"Examples:
---------
Code table:    `huffsort codes -i my_text.txt`
Draw tree:     `huffsort tree -l -i my_text.txt`
Summary:       `huffsort stats -i my_text.txt`";

    let mut main_cmd = Command::new("huffsort")
        .about("Build Huffman codes for the bytes of a file")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(input_command("codes","print the code of each byte and the encoded size"));
    main_cmd = main_cmd.subcommand(input_command("tree","draw the Huffman tree"));
    main_cmd = main_cmd.subcommand(input_command("stats","print a summary of the tree"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("codes") {
        let (freq,tree) = load(cmd)?;
        print!("{}",report::text_report(&freq,&tree)?);
        let bits = codes::encoded_bits(&freq,&codes::code_table(&tree));
        eprintln!("encoded {} into {}",freq.total(),codes::encoded_bytes(bits));
        tree.destroy();
    }

    if let Some(cmd) = matches.subcommand_matches("tree") {
        let (_freq,tree) = load(cmd)?;
        print!("{}",tree_art::render(&tree));
        tree.destroy();
    }

    if let Some(cmd) = matches.subcommand_matches("stats") {
        let (freq,tree) = load(cmd)?;
        print!("{}",report::stats(&freq,&tree));
        tree.destroy();
    }

    Ok(())
}
