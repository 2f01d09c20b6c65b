//! The outer driver (§5): runs Analyze → Calibrate → Convert → Verify →
//! Certify in sequence against fully-prepared per-stage inputs,
//! returning either a sealed certificate or the first fail-closed
//! fault encountered. Deriving those per-stage inputs from the raw
//! (out-of-scope) `ModelParser`/`DatasetLoader` collaborators is left
//! to the caller; this driver only sequences the five in-scope stages.

use cq_analyze::config::AnalyzeConfig;
use cq_analyze::theorist::LayerSpec;
use cq_calibrate::config::CalibrateConfig;
use cq_certificate::{Certificate, CertificateBuilder};
use cq_convert::{check_dyadic, enforce_symmetric, quantize_tensor};
use cq_error::{CqError, Result};
use cq_types::{Clock, FaultSet, LayerComparison, TensorStatistics};
use cq_verify::config::VerifyConfig;

/// Everything one end-to-end run needs, pre-computed by the caller from
/// the (out-of-scope) model parser, dataset loader, and inference
/// engine. Nothing here performs file I/O.
pub struct PipelineInput {
    pub layers: Vec<LayerSpec>,
    pub analyze_config: AnalyzeConfig,
    pub calibrate_config: CalibrateConfig,
    pub verify_config: VerifyConfig,

    pub calibration_dataset_hash: [u8; 32],
    pub calibration_sample_count: u64,
    pub tensors: Vec<TensorStatistics>,

    /// Per-layer `(weights, rows, cols, bias_scale_exp)`, one entry per
    /// entry in `layers`: the weights are quantized at that layer's
    /// weight scale exponent, and `bias_scale_exp` is checked against
    /// the layer's weight/input exponents for the dyadic constraint.
    pub weight_layers: Vec<(Vec<f32>, usize, usize, i8)>,

    pub verification_dataset_hash: [u8; 32],
    pub layer_comparisons: Vec<LayerComparison>,
    pub total_comparison: LayerComparison,

    pub source_model_hash: [u8; 32],
    pub bn_folding_hash: [u8; 32],
    pub folded: bool,
    pub quantized_model_hash: [u8; 32],
    pub target_param_count: u64,
    pub certificate_version: u32,
    pub scope_format: u8,
}

/// Runs the five in-scope stages in sequence against an injected
/// [`Clock`], the single cross-cutting capability the certificate's
/// timestamp depends on.
pub struct PipelineDriver<'a> {
    clock: &'a dyn Clock,
}

impl<'a> PipelineDriver<'a> {
    /// Construct a driver bound to the given clock.
    #[must_use]
    pub const fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    /// Run the pipeline to completion.
    ///
    /// # Errors
    /// Returns the first fail-closed error encountered: an invalid
    /// Analyze context (asymmetric spec, unfolded BatchNorm), a
    /// calibration range veto, a dyadic or symmetric-quantization
    /// violation in Convert, a verification bound violation, or an
    /// incomplete/fatal-fault-blocked certificate assembly.
    pub fn run(&self, input: PipelineInput) -> Result<Certificate> {
        let mut ctx = cq_analyze::theorist::start_context(&input.analyze_config);
        for spec in &input.layers {
            cq_analyze::theorist::analyze_layer(&mut ctx, spec)?;
        }
        cq_analyze::theorist::finish_context(&mut ctx);
        let analysis_digest = cq_analyze::digest::analysis_digest(&ctx)?;

        let calibration_report = cq_calibrate::observer::finalize_report(
            input.calibration_dataset_hash,
            input.calibration_sample_count,
            input.tensors,
            &input.calibrate_config,
        );
        if !calibration_report.passed() {
            let offender = calibration_report
                .tensors
                .iter()
                .find(|t| t.range_veto)
                .map_or_else(|| "<unknown>".to_owned(), |t| t.name.clone());
            return Err(CqError::RangeVetoTriggered { tensor: offender });
        }
        let calibration_digest = cq_calibrate::digest::calibration_digest(&calibration_report);

        let mut convert_faults = FaultSet::empty();
        for ((weights, _rows, _cols, bias_scale_exp), spec) in
            input.weight_layers.iter().zip(input.layers.iter())
        {
            enforce_symmetric(spec.is_symmetric, &mut convert_faults)?;
            // Quantized values themselves aren't needed here (the target
            // model hash is precomputed input); only the faults accumulated
            // while quantizing feed into the certificate's fault set.
            let _ =
                quantize_tensor(weights, spec.weight_scale_exp, &mut convert_faults);
            check_dyadic(*bias_scale_exp, spec.weight_scale_exp, spec.input_scale_exp)?;
        }

        if input.total_comparison.sample_count < input.verify_config.min_samples {
            tracing::warn!(
                sample_count = input.total_comparison.sample_count,
                min_samples = input.verify_config.min_samples,
                "verification sample count below configured minimum"
            );
        }

        let verification_report = cq_verify::check_bounds(
            input.verification_dataset_hash,
            input.layer_comparisons,
            input.total_comparison,
        )?;
        let verification_digest = cq_verify::verification_digest(&verification_report);

        let layer_count = u32::try_from(ctx.layer_count()).unwrap_or(u32::MAX);
        let builder = CertificateBuilder::new()
            .with_version(input.certificate_version)
            .with_source(input.source_model_hash, input.bn_folding_hash, input.folded)
            .with_analysis_digest(analysis_digest)
            .with_calibration_digest(calibration_digest)
            .with_verification_digest(verification_digest)
            .with_target(
                input.quantized_model_hash,
                input.target_param_count,
                layer_count,
                input.scope_format,
            );

        let combined_faults =
            ctx.faults | calibration_report.faults | convert_faults | verification_report.faults;
        builder.build(combined_faults, self.clock)
    }
}
