use misb_klv_decode::{field_spec, FIELDS};

use crate::cmd::TagsArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_tags, OutputFormat};

pub fn run(args: TagsArgs, format: OutputFormat) -> CliResult<i32> {
    match args.tag {
        Some(tag) => {
            let spec = field_spec(tag)
                .ok_or_else(|| CliError::new(USAGE, format!("unknown tag {tag}")))?;
            print_tags(std::slice::from_ref(spec), format);
        }
        None => print_tags(&FIELDS, format),
    }
    Ok(SUCCESS)
}
