//! The risk-factor pipeline.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use strata_config::{EngineConfig, Validate};
use strata_core::types::OptionChains;
use strata_core::Date;
use strata_curves::{Curve, CurveKind, SpotCurveBootstrapper};
use strata_options::{DividendCurveBuilder, IVSurface, VolatilitySurfaceBuilder};
use strata_store::{load_json, store_json, SnapshotKey, SnapshotKind, SnapshotStore};

use crate::error::{EngineError, EngineResult};

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    /// The fitted par curve.
    pub par_curve: Curve,
    /// The bootstrapped and fitted spot curve.
    pub spot_curve: Curve,
    /// The fitted implied dividend yield curve.
    pub dividend_curve: Curve,
    /// The implied volatility surface.
    pub surface: IVSurface,
}

/// Builds spot curves, dividend curves and volatility surfaces.
///
/// With a [`SnapshotStore`] attached every stage is load-or-build: a snapshot
/// stored under the stage's key is reused as is, otherwise the stage runs and
/// its output is stored. Store failures are logged and never fail a build.
pub struct RiskFactorEngine {
    config: EngineConfig,
    store: Option<Arc<dyn SnapshotStore>>,
}

impl std::fmt::Debug for RiskFactorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskFactorEngine")
            .field("config", &self.config)
            .field("store", &self.store.as_ref().map(|s| s.backend_name()))
            .finish()
    }
}

impl RiskFactorEngine {
    /// Creates an engine without a store.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` if the configuration fails validation.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate_or_error()?;
        Ok(Self {
            config,
            store: None,
        })
    }

    /// Attaches a snapshot store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The attached store, if any.
    pub fn store(&self) -> Option<&Arc<dyn SnapshotStore>> {
        self.store.as_ref()
    }

    /// Fits the par curve with the configured par fit, unless it already
    /// carries a model.
    ///
    /// Cached under `par_curve_<date>` when a fit is needed.
    pub fn fit_par_curve(&self, par_curve: &Curve) -> EngineResult<Curve> {
        expect_kind("par curve", par_curve, CurveKind::Par)?;
        if par_curve.is_fitted() {
            return Ok(par_curve.clone());
        }
        let key = SnapshotKey::new(SnapshotKind::ParCurve, par_curve.evaluation_date());
        self.load_or_build(&key, || {
            let fitted = par_curve.fit(&self.config.curves.par_fit)?;
            tracing::debug!(
                points = par_curve.len(),
                method = %self.config.curves.par_fit,
                "Fitted par curve"
            );
            Ok(fitted)
        })
    }

    /// Bootstraps and fits the spot curve.
    ///
    /// Cached under `spot_curve_<date>`.
    pub fn build_spot_curve(&self, par_curve: &Curve) -> EngineResult<Curve> {
        let key = SnapshotKey::new(SnapshotKind::SpotCurve, par_curve.evaluation_date());
        self.load_or_build(&key, || {
            let par = self.fit_par_curve(par_curve)?;
            let spot = SpotCurveBootstrapper::new(self.config.curves.bootstrap).bootstrap(&par)?;
            let fitted = spot.fit(&self.config.curves.spot_fit)?;
            tracing::info!(
                date = %par_curve.evaluation_date(),
                points = fitted.len(),
                "Built spot curve"
            );
            Ok(fitted)
        })
    }

    /// Implies and fits the dividend yield curve.
    ///
    /// Cached under `dividend_curve_<underlying>_<date>`.
    pub fn build_dividend_curve(
        &self,
        chains: &OptionChains,
        spot_curve: &Curve,
        as_of: Date,
    ) -> EngineResult<Curve> {
        expect_kind("dividend curve", spot_curve, CurveKind::Spot)?;
        let key =
            SnapshotKey::for_underlying(SnapshotKind::DividendCurve, chains.underlying(), as_of);
        self.load_or_build(&key, || {
            let raw = self.dividend_builder().build(chains, spot_curve, as_of)?;
            let fitted = raw.fit(&self.config.curves.dividend_fit)?;
            tracing::info!(
                underlying = chains.underlying(),
                expiries = fitted.len(),
                "Built dividend curve"
            );
            Ok(fitted)
        })
    }

    /// Builds the implied volatility surface.
    ///
    /// Cached under `vol_surface_<underlying>_<date>`.
    pub fn build_surface(
        &self,
        chains: &OptionChains,
        spot_curve: &Curve,
        dividend_curve: &Curve,
        as_of: Date,
    ) -> EngineResult<IVSurface> {
        expect_kind("surface", spot_curve, CurveKind::Spot)?;
        expect_kind("surface", dividend_curve, CurveKind::Dividend)?;
        let key = SnapshotKey::for_underlying(SnapshotKind::VolSurface, chains.underlying(), as_of);
        self.load_or_build(&key, || {
            let surface = self
                .surface_builder()
                .build(chains, spot_curve, dividend_curve, as_of)?;
            tracing::info!(
                underlying = chains.underlying(),
                slices = surface.len(),
                points = surface.point_count(),
                "Built volatility surface"
            );
            Ok(surface)
        })
    }

    /// Runs the full pipeline: par fit, spot bootstrap, dividend curve,
    /// volatility surface.
    ///
    /// The input chains are recorded under `option_chains_<underlying>_<date>`.
    pub fn run(&self, par_curve: &Curve, chains: &OptionChains, as_of: Date) -> EngineResult<RiskFactors> {
        tracing::info!(
            underlying = chains.underlying(),
            %as_of,
            expiries = chains.len(),
            "Building risk factors"
        );
        self.record_chains(chains, as_of);

        let par_curve = self.fit_par_curve(par_curve)?;
        let spot_curve = self.build_spot_curve(&par_curve)?;
        let dividend_curve = self.build_dividend_curve(chains, &spot_curve, as_of)?;
        let surface = self.build_surface(chains, &spot_curve, &dividend_curve, as_of)?;

        Ok(RiskFactors {
            par_curve,
            spot_curve,
            dividend_curve,
            surface,
        })
    }

    fn dividend_builder(&self) -> DividendCurveBuilder {
        DividendCurveBuilder::new(self.config.dividend)
            .with_pricer_config(self.config.pricer)
            .with_implied_vol(self.config.implied_vol)
            .with_parallel(self.config.parallel)
            .with_day_count(self.config.day_count)
    }

    fn surface_builder(&self) -> VolatilitySurfaceBuilder {
        VolatilitySurfaceBuilder::new(self.config.surface)
            .with_pricer_config(self.config.pricer)
            .with_implied_vol(self.config.implied_vol)
            .with_parallel(self.config.parallel)
            .with_day_count(self.config.day_count)
    }

    fn record_chains(&self, chains: &OptionChains, as_of: Date) {
        let Some(store) = self.store.as_deref() else {
            return;
        };
        let key =
            SnapshotKey::for_underlying(SnapshotKind::OptionChains, chains.underlying(), as_of);
        if let Err(e) = store_json(store, &key, chains) {
            tracing::warn!(%key, error = %e, "Failed to record option chains");
        }
    }

    fn load_or_build<T, F>(&self, key: &SnapshotKey, build: F) -> EngineResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> EngineResult<T>,
    {
        let Some(store) = self.store.as_deref() else {
            return build();
        };

        match load_json::<T>(store, key) {
            Ok(Some(value)) => {
                tracing::debug!(%key, backend = store.backend_name(), "Loaded snapshot");
                return Ok(value);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(%key, error = %e, "Ignoring unreadable snapshot");
            }
        }

        let value = build()?;
        if let Err(e) = store_json(store, key, &value) {
            tracing::warn!(%key, error = %e, "Failed to store snapshot");
        }
        Ok(value)
    }
}

fn expect_kind(stage: &'static str, curve: &Curve, kind: CurveKind) -> EngineResult<()> {
    if curve.kind() == kind {
        Ok(())
    } else {
        Err(EngineError::stage(
            stage,
            format!("expected a {kind} curve, got {}", curve.kind()),
        ))
    }
}
