//! Chunked fixed-effects least squares.
//!
//! The pseudo-inverse of the design is computed once. Vertices are then
//! processed in contiguous chunks of at most `max_chunk` columns; each
//! chunk is an independent pure computation whose results are copied
//! into disjoint column ranges of the output, so chunking bounds peak
//! memory without affecting the numbers.

use std::ops::Range;
use std::sync::Arc;

use faer::{Mat, MatRef};
use surfstat_math::{PackedSymmetric, PseudoInverse};
use surfstat_mesh::{extract_edges, Mesh, MeshSource};
use surfstat_types::constants::MACHINE_EPSILON;
use surfstat_types::{StatsError, StatsResult};

use crate::config::FitConfig;
use crate::design::DesignInput;
use crate::model::FittedModel;
use crate::resl::edge_roughness;
use crate::response::Response;

/// Results of fitting one contiguous block of vertices.
#[derive(Debug, Clone)]
pub struct ChunkFit {
    /// `predictors × chunk` coefficients per component.
    pub coef: Vec<Mat<f64>>,
    /// Packed residual cross-products for the chunk.
    pub sse: PackedSymmetric,
    /// `observations × chunk` residuals per component.
    pub residuals: Vec<Mat<f64>>,
}

/// Fits a linear model at every vertex of `response`.
///
/// When `mesh` is given, its edges are extracted and the per-edge
/// residual roughness (`resl`) is computed; the mesh is retained on
/// the model.
///
/// # Example
/// ```
/// use faer::Mat;
/// use surfstat_linmod::{fit, DesignInput, FitConfig, Response};
///
/// let y = Response::univariate(Mat::from_fn(3, 1, |i, _| 2.0 * (i + 1) as f64));
/// let model = fit(&y, &DesignInput::Scalar(1.0), None, &FitConfig::default()).unwrap();
/// assert_eq!(model.df, 2);
/// assert!((model.coef[0][(0, 0)] - 4.0).abs() < 1e-12);
/// assert!((model.sse.get(0, 0, 0) - 8.0).abs() < 1e-12);
/// ```
pub fn fit(
    response: &Response,
    design: &DesignInput,
    mesh: Option<MeshSource<'_>>,
    config: &FitConfig,
) -> StatsResult<FittedModel> {
    let shared = mesh.map(|m| m.to_mesh().map(Arc::new)).transpose()?;
    fit_with_shared_mesh(response, design, shared, config)
}

/// Like [`fit`], but keeps the caller's `Arc` instead of cloning the mesh.
pub fn fit_with_shared_mesh(
    response: &Response,
    design: &DesignInput,
    mesh: Option<Arc<Mesh>>,
    config: &FitConfig,
) -> StatsResult<FittedModel> {
    config.validate()?;

    let n = response.observations();
    let v = response.vertices();
    let k = response.components();
    if k == 0 {
        return Err(StatsError::DimensionMismatch(
            "response has no components".into(),
        ));
    }

    if let Some(mesh) = &mesh {
        let mesh_vertices = mesh.vertex_count();
        if mesh_vertices != v {
            return Err(StatsError::DimensionMismatch(format!(
                "mesh has {mesh_vertices} vertices but response has {v}"
            )));
        }
    }

    let x = design.resolve(n)?;
    let p = x.ncols();
    let pinv = PseudoInverse::compute(x.as_ref())?;

    if config.warn_on_missing_intercept {
        check_intercept(x.as_ref(), &pinv);
    }
    if config.iterations > 1 {
        tracing::warn!(
            iterations = config.iterations,
            "variance components are not modelled; fitting fixed effects only"
        );
    }

    let df = n - pinv.rank;
    tracing::debug!(
        observations = n,
        predictors = p,
        rank = pinv.rank,
        df,
        vertices = v,
        components = k,
        "linear_model_fit"
    );

    let keep_residuals = mesh.is_some();
    let mut coef: Vec<Mat<f64>> = (0..k).map(|_| Mat::zeros(p, v)).collect();
    let mut sse = PackedSymmetric::zeros(k, v);
    let mut residuals: Vec<Mat<f64>> = if keep_residuals {
        (0..k).map(|_| Mat::zeros(n, v)).collect()
    } else {
        Vec::new()
    };

    for columns in chunk_ranges(v, config.max_chunk) {
        tracing::debug!(start = columns.start, end = columns.end, "fit_chunk");
        let chunk = fit_chunk(x.as_ref(), pinv.pinv.as_ref(), response, columns.clone());

        for j in 0..k {
            copy_columns(&mut coef[j], columns.start, chunk.coef[j].as_ref());
            if keep_residuals {
                copy_columns(&mut residuals[j], columns.start, chunk.residuals[j].as_ref());
            }
        }
        sse.write_columns(columns.start, &chunk.sse)?;
    }

    let mut model = FittedModel {
        x,
        df,
        coef,
        sse,
        mesh: None,
        resl: None,
    };

    if let Some(mesh) = mesh {
        let edges = extract_edges(MeshSource::from(mesh.as_ref()), None)?;
        if let Some(max) = edges.max_vertex() {
            if max as usize >= v {
                return Err(StatsError::DimensionMismatch(format!(
                    "mesh edges reference vertex {max} but response has {v} vertices"
                )));
            }
        }
        let resl = edge_roughness(&residuals, &model.sse, &edges);
        tracing::debug!(edges = edges.len(), "residual_roughness");
        model = model.with_mesh(mesh, resl)?;
    }

    Ok(model)
}

/// Fits the vertices in `columns` of every component.
///
/// Pure: depends only on the design, its pseudo-inverse and those columns.
pub fn fit_chunk(
    x: MatRef<'_, f64>,
    pinv: MatRef<'_, f64>,
    response: &Response,
    columns: Range<usize>,
) -> ChunkFit {
    let n = response.observations();
    let k = response.components();
    let vc = columns.len();

    let mut coef = Vec::with_capacity(k);
    let mut residuals = Vec::with_capacity(k);
    for j in 0..k {
        let y = response.component(j);
        let yc = Mat::from_fn(n, vc, |i, c| y[(i, columns.start + c)]);
        let b = pinv * yc.as_ref();
        let fitted = x * b.as_ref();
        residuals.push(Mat::from_fn(n, vc, |i, c| yc[(i, c)] - fitted[(i, c)]));
        coef.push(b);
    }

    let mut sse = PackedSymmetric::zeros(k, vc);
    for j1 in 0..k {
        for j2 in 0..=j1 {
            let (r1, r2) = (&residuals[j1], &residuals[j2]);
            for c in 0..vc {
                let s: f64 = (0..n).map(|i| r1[(i, c)] * r2[(i, c)]).sum();
                sse.set(j1, j2, c, s);
            }
        }
    }

    ChunkFit {
        coef,
        sse,
        residuals,
    }
}

/// Splits `0..total` into consecutive ranges of at most `max_chunk`.
pub fn chunk_ranges(total: usize, max_chunk: usize) -> impl Iterator<Item = Range<usize>> {
    let step = max_chunk.max(1);
    (0..total)
        .step_by(step)
        .map(move |start| start..(start + step).min(total))
}

/// Mean squared residual of projecting a constant column onto the span of `x`.
///
/// Near zero when a constant column lies in the span of `x`; [`fit`]
/// logs a warning above machine epsilon.
pub fn intercept_residual(x: MatRef<'_, f64>, pinv: &PseudoInverse) -> f64 {
    let n = x.nrows();
    if n == 0 {
        return 0.0;
    }
    let ones = vec![1.0; n];
    let projected = pinv.project(x, &ones);
    projected
        .iter()
        .map(|&f| (1.0 - f) * (1.0 - f))
        .sum::<f64>()
        / n as f64
}

fn check_intercept(x: MatRef<'_, f64>, pinv: &PseudoInverse) {
    let residual = intercept_residual(x, pinv);
    if residual > MACHINE_EPSILON {
        tracing::warn!(
            residual,
            "design does not span a constant term; did you forget an intercept?"
        );
    }
}

fn copy_columns(dst: &mut Mat<f64>, start: usize, src: MatRef<'_, f64>) {
    for c in 0..src.ncols() {
        for r in 0..src.nrows() {
            dst[(r, start + c)] = src[(r, c)];
        }
    }
}
