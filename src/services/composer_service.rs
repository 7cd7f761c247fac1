use tracing::debug;
use crate::models::{Cell, Figure, Layout, PlotRequest, PriceTable, Selection, SizeSpec, Trace};
use crate::utils::{ColorMap, ComposeError};

/// Build a figure from one or more tables and paired column selections.
///
/// Traces come out in dataset order, then in selection order within each
/// group. The y-axis is always logarithmic.
pub fn compose(request: &PlotRequest<'_>, colors: &ColorMap) -> Result<Figure, ComposeError> {
    validate(request)?;

    let mut figure = Figure::new(Layout::new(
        request.title.clone(),
        request.x_title.clone(),
        request.y_title.clone(),
    ));

    for (group, (x_sel, y_sel)) in request.x.iter().zip(&request.y).enumerate() {
        let table = request.datasets.get(group).ok_or(ComposeError::SelectorCountMismatch {
            datasets: request.datasets.len(),
            x: request.x.len(),
            y: request.y.len(),
        })?;

        for (j, (x_col, y_col)) in pair_columns(group, x_sel, y_sel)?.into_iter().enumerate() {
            let x = column_cells(table, group, x_col)?;
            let y = column_cells(table, group, y_col)?;
            let color = colors.resolve(y_col, figure.traces.len());
            let marker_size = request.size.as_ref().and_then(|s| s.size_for(group, j));

            figure.traces.push(Trace {
                name: y_col.to_string(),
                x,
                y,
                color,
                marker_size,
            });
        }
    }

    debug!("Composed figure with {} trace(s) from {} dataset(s)", figure.traces.len(), request.datasets.len());
    Ok(figure)
}

fn validate(request: &PlotRequest<'_>) -> Result<(), ComposeError> {
    let datasets = request.datasets.len();

    if request.x.len() != datasets || request.y.len() != datasets {
        return Err(ComposeError::SelectorCountMismatch {
            datasets,
            x: request.x.len(),
            y: request.y.len(),
        });
    }

    if let Some(SizeSpec::PerGroup(sizes)) = &request.size {
        if sizes.len() > datasets {
            return Err(ComposeError::TooManySizes { sizes: sizes.len(), datasets });
        }
    }

    Ok(())
}

/// Pair x and y columns positionally within one group
fn pair_columns<'r>(
    group: usize,
    x: &'r Selection<String>,
    y: &'r Selection<String>,
) -> Result<Vec<(&'r str, &'r str)>, ComposeError> {
    let mismatch = || ComposeError::PairingMismatch { group, x: x.len(), y: y.len() };

    match (x, y) {
        (Selection::Single(x), Selection::Single(y)) => Ok(vec![(x.as_str(), y.as_str())]),
        (Selection::Single(x), Selection::Grouped(ys)) => {
            Ok(ys.iter().map(|y| (x.as_str(), y.as_str())).collect())
        }
        (Selection::Grouped(xs), Selection::Single(y)) => match xs.as_slice() {
            [x] => Ok(vec![(x.as_str(), y.as_str())]),
            _ => Err(mismatch()),
        },
        (Selection::Grouped(xs), Selection::Grouped(ys)) => {
            if xs.len() != ys.len() {
                return Err(mismatch());
            }
            Ok(xs.iter().zip(ys).map(|(x, y)| (x.as_str(), y.as_str())).collect())
        }
    }
}

fn column_cells(table: &PriceTable, group: usize, name: &str) -> Result<Vec<Cell>, ComposeError> {
    table
        .column(name)
        .map(|c| c.data.cells())
        .ok_or_else(|| ComposeError::UnknownColumn { group, column: name.to_string() })
}
