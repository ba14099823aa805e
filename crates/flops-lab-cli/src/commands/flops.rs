use flops_lab::flops::{MatrixShape, compute_flops};

use super::{OutputFormat, group_digits};

pub fn run(a: MatrixShape, b: MatrixShape, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let result = compute_flops(a, b)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            println!("A ({a}) × B ({b}) = C ({})", result.output_shape);
            println!("Multiplications: {}", group_digits(result.multiplications));
            println!("Additions:       {}", group_digits(result.additions));
            println!("Total FLOPs:     {}", group_digits(result.total_flops));
            println!(
                "Per output element: {} FLOPs ({} mul + {} add)",
                result.flops_per_output_element(),
                a.cols,
                a.cols - 1
            );
        }
    }

    Ok(())
}
