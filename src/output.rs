use core::fmt;
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use faer_core::MatRef;

use crate::{driver::SimError, Float, Problem, Solution};

const SIGNIFICANT_DIGITS: usize = 6;

/// Formats a float like `printf("%g")`: 6 significant digits, trailing zeros
/// dropped, scientific notation outside `[1e-4, 1e6)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct General(pub Float);

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

impl fmt::Display for General {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v < 0.0 { "-inf" } else { "inf" });
        }
        if v == 0.0 {
            return f.write_str(if v.is_sign_negative() { "-0" } else { "0" });
        }

        // the decimal exponent after rounding to the requested precision
        // decides between fixed and scientific notation
        let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, v);
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);

        if (-4..SIGNIFICANT_DIGITS as i32).contains(&exponent) {
            let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
            let fixed = format!("{:.*}", decimals, v);
            f.write_str(trim_fraction(&fixed))
        } else {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(
                f,
                "{}e{}{:02}",
                trim_fraction(mantissa),
                sign,
                exponent.unsigned_abs()
            )
        }
    }
}

/// Header block of a point file.
#[derive(Debug, Clone, Copy)]
pub struct Header<'a> {
    pub title: &'a str,
    pub variables: &'a [&'a str],
}

/// Writes `header` and then one line per grid point: the coordinate followed
/// by the value of each field at that point.
pub fn write_points<W: Write>(
    out: &mut W,
    header: &Header<'_>,
    x: MatRef<'_, Float>,
    fields: &[MatRef<'_, Float>],
) -> io::Result<()> {
    debug_assert!(fields.iter().all(|f| f.nrows() == x.nrows()));

    writeln!(out, "TITLE = \"{}\"", header.title)?;
    write!(out, "VARIABLES = \"x\"")?;
    for variable in header.variables {
        write!(out, ", \"{}\"", variable)?;
    }
    writeln!(out)?;
    writeln!(out, "ZONE T=\"Only Zone\", I={}, F=POINT", x.nrows())?;

    for i in 0..x.nrows() {
        write!(out, "{}", General(x[(i, 0)]))?;
        for field in fields {
            write!(out, " {}", General(field[(i, 0)]))?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Same as [`write_points`], into a freshly created file at `path`.
pub fn write_point_file(
    path: &Path,
    header: &Header<'_>,
    x: MatRef<'_, Float>,
    fields: &[MatRef<'_, Float>],
) -> Result<(), SimError> {
    let export_error = |source| SimError::Export {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::create(path).map_err(export_error)?;
    let mut output = BufWriter::new(file);
    write_points(&mut output, header, x, fields).map_err(export_error)?;
    output.flush().map_err(export_error)
}

pub const NUMERICAL_FILE: &str = "num.dat";
pub const EXACT_FILE: &str = "exact.dat";
pub const COMPARISON_FILE: &str = "numVsExact.dat";

/// Writes the final field, the exact solution and both side by side.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn export(&self, problem: &Problem, solution: &Solution) -> Result<Vec<PathBuf>, SimError> {
        let x = solution.coordinates();
        let numerical = solution.values();
        let exact = solution.exact(problem);
        let exact = exact.as_ref();

        let files = [
            (
                NUMERICAL_FILE,
                Header {
                    title: "Numerical solution",
                    variables: &["numerical solution"],
                },
                vec![numerical],
            ),
            (
                EXACT_FILE,
                Header {
                    title: "Exact solution",
                    variables: &["exact solution"],
                },
                vec![exact],
            ),
            (
                COMPARISON_FILE,
                Header {
                    title: "Exact solution vs numerical solution",
                    variables: &["exact solution", "numerical solution"],
                },
                vec![exact, numerical],
            ),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (name, header, fields) in files.iter() {
            let path = self.dir.join(name);
            write_point_file(&path, header, x, fields)?;
            tracing::debug!("wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}
