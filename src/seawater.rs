//! Seawater thermodynamics for hydrographic profiles.
//!
//! Implements the TEOS-10 formulation:
//!
//! - potential temperature referenced to the sea surface, found by matching
//!   the entropy of the Gibbs function with a modified Newton iteration,
//! - conservative temperature as potential enthalpy divided by [`CP0`],
//! - in-situ density from the 75-term polynomial for specific volume in
//!   terms of Absolute Salinity, conservative temperature and pressure,
//! - potential density anomalies `sigma0`, `sigma2` and `sigma4`.
//!
//! Station salinities are passed straight through as Absolute Salinity.
//!
//! # Units
//!
//! - Temperature: °C (ITS-90)
//! - Absolute Salinity: g/kg
//! - Pressure: dbar (sea pressure, 0 at the surface)
//! - Density: kg/m³
//!
//! # References
//!
//! - IOC, SCOR and IAPSO (2010): The international thermodynamic equation of
//!   seawater 2010. Manuals and Guides 56, UNESCO.
//! - Roquet, Madec, McDougall and Barker (2015): Accurate polynomial
//!   expressions for the density and specific volume of seawater using the
//!   TEOS-10 standard. Ocean Modelling 90.

use crate::errors::{OceanDiagError, Result};
use ndarray::{Array1, ArrayView1, Zip};

/// Offset between potential density and its sigma anomaly (kg/m³).
pub const SIGMA_OFFSET: f64 = 1000.0;

/// Heat capacity used to scale potential enthalpy into conservative
/// temperature (J kg⁻¹ K⁻¹).
pub const CP0: f64 = 3991.867_957_119_63;

/// Reference pressures of the three potential densities (dbar).
pub const SIGMA_REFERENCE_PRESSURES: [f64; 3] = [0.0, 2000.0, 4000.0];

/// Standard Ocean Reference Salinity (g/kg).
pub const SSO: f64 = 35.165_04;

/// Celsius zero point (K).
const T0: f64 = 273.15;

/// Absolute Salinity of standard seawater per unit of practical salinity.
const UPS: f64 = SSO / 35.0;

/// `1 / (40 · UPS)`, scales Absolute Salinity into the Gibbs function variable.
const SFAC: f64 = 0.024_882_667_558_461_5;

/// Salinity shift of the polynomial's square-root variable.
const SALINITY_OFFSET: f64 = 5.971_840_214_030_754e-1;

/// Specific volume coefficients `(ct power, salinity power, pressure power, value)`
/// of the 75-term polynomial, m³/kg.
#[rustfmt::skip]
const SPECVOL: [(usize, usize, usize, f64); 75] = [
    (0, 0, 0,  1.076_999_586_2e-3), (0, 0, 1, -6.079_914_380_9e-5), (0, 0, 2,  9.985_616_921_9e-6),
    (0, 0, 3, -1.130_936_143_7e-6), (0, 0, 4,  1.053_115_308_0e-7), (0, 0, 5, -1.264_726_128_6e-8),
    (0, 0, 6,  1.961_350_393_0e-9),
    (0, 1, 0, -3.103_898_197_6e-4), (0, 1, 1,  2.426_246_874_7e-5), (0, 1, 2, -5.848_443_298_4e-7),
    (0, 1, 3,  3.631_018_851_5e-7), (0, 1, 4, -1.114_712_542_3e-7),
    (0, 2, 0,  6.692_806_703_8e-4), (0, 2, 1, -3.479_246_097_4e-5), (0, 2, 2, -4.812_225_159_7e-6),
    (0, 2, 3,  1.674_630_378_0e-8),
    (0, 3, 0, -8.504_793_393_7e-4), (0, 3, 1,  3.747_077_730_5e-5), (0, 3, 2,  4.926_310_699_8e-6),
    (0, 4, 0,  5.808_606_994_3e-4), (0, 4, 1, -1.732_221_861_2e-5), (0, 4, 2, -1.781_197_472_7e-6),
    (0, 5, 0, -2.109_237_050_7e-4), (0, 5, 1,  3.092_742_725_3e-6),
    (0, 6, 0,  3.193_245_730_5e-5),
    (1, 0, 0, -1.564_973_467_5e-5), (1, 0, 1,  1.850_576_542_9e-5), (1, 0, 2, -1.173_638_673_1e-6),
    (1, 0, 3, -3.652_700_655_3e-7), (1, 0, 4,  3.145_409_990_2e-7),
    (1, 1, 0,  3.500_959_976_4e-5), (1, 1, 1, -9.567_708_815_6e-6), (1, 1, 2, -5.569_915_455_7e-6),
    (1, 1, 3, -2.729_569_623_7e-7),
    (1, 2, 0, -4.359_267_856_1e-5), (1, 2, 1,  1.110_083_476_5e-5), (1, 2, 2,  5.462_074_883_4e-6),
    (1, 3, 0,  3.453_246_182_8e-5), (1, 3, 1, -9.844_711_784_4e-6), (1, 3, 2, -1.354_418_562_7e-6),
    (1, 4, 0, -1.195_940_978_8e-5), (1, 4, 1,  2.590_922_526_0e-6),
    (1, 5, 0,  1.386_459_458_1e-6),
    (2, 0, 0,  2.776_210_648_4e-5), (2, 0, 1, -1.171_660_685_3e-5), (2, 0, 2,  2.130_502_874_0e-6),
    (2, 0, 3,  2.869_590_515_9e-7),
    (2, 1, 0, -3.743_584_234_4e-5), (2, 1, 1, -2.367_830_836_1e-7), (2, 1, 2,  3.913_738_708_0e-7),
    (2, 2, 0,  3.590_782_276_0e-5), (2, 2, 1,  2.928_334_629_5e-6), (2, 2, 2, -6.573_110_406_7e-7),
    (2, 3, 0, -1.869_858_418_7e-5), (2, 3, 1, -4.882_613_920_0e-7),
    (2, 4, 0,  3.859_533_924_4e-6),
    (3, 0, 0, -1.652_115_925_9e-5), (3, 0, 1,  7.927_965_617_3e-6), (3, 0, 2, -4.613_254_003_7e-7),
    (3, 1, 0,  2.414_147_948_3e-5), (3, 1, 1, -3.455_877_365_5e-6), (3, 1, 2,  7.761_888_809_2e-9),
    (3, 2, 0, -1.435_363_304_8e-5), (3, 2, 1,  3.165_530_607_8e-7),
    (3, 3, 0,  2.286_332_455_6e-6),
    (4, 0, 0,  6.911_132_270_2e-6), (4, 0, 1, -3.410_218_748_2e-6), (4, 0, 2, -6.335_291_651_4e-8),
    (4, 1, 0, -8.759_587_315_4e-6), (4, 1, 1,  1.295_671_778_3e-6),
    (4, 2, 0,  4.370_368_059_8e-6),
    (5, 0, 0, -8.053_961_554_0e-7), (5, 0, 1,  5.073_676_681_4e-7),
    (5, 1, 0, -3.305_275_890_0e-7),
    (6, 0, 0,  2.054_309_426_8e-7),
];

/// Powers `x⁰ … x⁶` for evaluating [`SPECVOL`].
#[inline]
fn powers(x: f64) -> [f64; 7] {
    let mut out = [1.0; 7];
    for k in 1..7 {
        out[k] = out[k - 1] * x;
    }
    out
}

/// Specific volume v(SA, Θ, p) in m³/kg.
pub fn specific_volume(absolute_salinity: f64, conservative_temp: f64, pressure: f64) -> f64 {
    let xs = powers((SFAC * absolute_salinity + SALINITY_OFFSET).sqrt());
    let ys = powers(conservative_temp * 0.025);
    let z = powers(pressure * 1e-4);

    SPECVOL
        .iter()
        .map(|&(i, j, k, coefficient)| coefficient * ys[i] * xs[j] * z[k])
        .sum()
}

/// In-situ density ρ(SA, Θ, p).
pub fn density(absolute_salinity: f64, conservative_temp: f64, pressure: f64) -> f64 {
    1.0 / specific_volume(absolute_salinity, conservative_temp, pressure)
}

/// Potential density anomaly `ρ(SA, Θ, p_ref) − 1000`.
///
/// Conservative temperature is unchanged by adiabatic displacement, so the
/// parcel is simply evaluated at the reference pressure.
pub fn sigma(absolute_salinity: f64, conservative_temp: f64, reference_pressure: f64) -> f64 {
    density(absolute_salinity, conservative_temp, reference_pressure) - SIGMA_OFFSET
}

pub fn sigma0(absolute_salinity: f64, conservative_temp: f64) -> f64 {
    sigma(absolute_salinity, conservative_temp, SIGMA_REFERENCE_PRESSURES[0])
}

pub fn sigma2(absolute_salinity: f64, conservative_temp: f64) -> f64 {
    sigma(absolute_salinity, conservative_temp, SIGMA_REFERENCE_PRESSURES[1])
}

pub fn sigma4(absolute_salinity: f64, conservative_temp: f64) -> f64 {
    sigma(absolute_salinity, conservative_temp, SIGMA_REFERENCE_PRESSURES[2])
}

/// Conservative temperature from potential temperature referenced to 0 dbar.
pub fn conservative_from_potential(absolute_salinity: f64, potential_temp: f64) -> f64 {
    let x2 = SFAC * absolute_salinity;
    let x = x2.sqrt();
    let y = potential_temp * 0.025;

    let pure_water = 61.013_624_206_810_71
        + y * (168_776.461_380_480_15
            + y * (-2735.278_560_511_962_5
                + y * (2574.216_445_382_143_3
                    + y * (-1536.664_443_497_754_3
                        + y * (545.734_049_793_162_9
                            + (-50.910_917_284_743_31 - 18.304_898_789_278_02 * y) * y)))));

    let salt = x2
        * (268.552_026_584_507_1
            + y * (-12_019.028_203_559_312
                + y * (3734.858_026_725_145
                    + y * (-2046.767_114_505_761_8
                        + y * (465.286_556_238_262_34
                            + (-0.637_082_030_237_635_9 - 10.650_848_542_359_153 * y) * y))))
            + x * (937.209_911_062_070_7
                + y * (588.180_281_217_010_8
                    + y * (248.394_765_229_712_85
                        + (-3.871_557_904_936_333 - 2.626_801_985_426_835_6 * y) * y))
                + x * (-1687.914_374_187_449
                    + x * (246.959_888_878_137_7
                        + x * (123.595_765_824_579_64 - 48.589_106_902_540_9 * x))
                    + y * (936.320_654_446_033_6
                        + y * (-942.782_730_454_443_9
                            + y * (369.438_943_750_900_2
                                + (-33.836_649_478_952_48 - 9.987_880_382_780_322 * y) * y))))));

    (pure_water + salt) / CP0
}

/// Entropy minus its terms that depend on salinity alone (J kg⁻¹ K⁻¹).
fn entropy_part(absolute_salinity: f64, temperature: f64, pressure: f64) -> f64 {
    let x2 = SFAC * absolute_salinity;
    let x = x2.sqrt();
    let y = temperature * 0.025;
    let z = pressure * 1e-4;

    let g03 = z
        * (-270.983_805_184_062
            + z * (776.153_611_613_101
                + z * (-196.512_550_881_22 + (28.979_652_629_417_5 - 2.132_900_835_183_27 * z) * z)))
        + y * (-24_715.571_866_078
            + z * (2910.072_908_093_6
                + z * (-1513.116_771_538_718
                    + z * (546.959_324_647_056
                        + z * (-111.120_812_763_443_6 + 8.688_413_438_343_94 * z))))
            + y * (2210.223_612_454_836_3
                + z * (-2017.523_349_435_21
                    + z * (1498.081_172_457_456
                        + z * (-718.635_991_963_235_9
                            + (146.403_755_578_161_6 - 4.989_213_186_267_150_5 * z) * z)))
                + y * (-592.743_745_734_632
                    + z * (1591.873_781_627_888
                        + z * (-1207.261_522_487_504
                            + (608.785_486_935_364 - 105.499_350_893_120_8 * z) * z))
                    + y * (290.129_562_921_285_47
                        + z * (-973.091_553_087_975
                            + z * (602.603_274_510_125
                                + z * (-276.361_526_170_076 + 32.409_533_403_861_05 * z)))
                        + y * (-113.906_307_908_503_21
                            + y * (21.355_715_254_157_69 - 67.417_568_357_514_34 * z)
                            + z * (381.068_361_985_070_96
                                + z * (-133.738_390_284_275_4 + 49.023_632_509_086_724 * z)))))));

    let g08 = x2
        * (z * (729.116_529_735_046
            + z * (-343.956_902_961_561
                + z * (124.687_671_116_248
                    + z * (-31.656_964_386_073 + 7.046_588_033_154_49 * z))))
            + x * (x
                * (y * (-137.114_501_840_898_2
                    + y * (148.100_308_456_876_18
                        + y * (-68.559_030_967_915_2 + 12.484_850_478_475_4 * y)))
                    - 22.668_355_851_282_9 * z)
                + z * (-175.292_041_186_547 + (83.192_392_780_181_9 - 29.483_064_349_429 * z) * z)
                + y * (-86.132_935_195_608_4
                    + z * (766.116_132_004_952
                        + z * (-108.383_452_503_422_4 + 51.279_697_477_982_8 * z))
                    + y * (-30.068_211_258_562_5 - 1380.959_795_403_770_8 * z
                        + y * (3.502_402_647_235_78 + 938.260_750_445_42 * z))))
            + y * (1760.062_705_994_408
                + y * (-675.802_947_790_203
                    + y * (365.704_179_100_503_6
                        + y * (-108.301_620_437_655_52 + 12.781_018_250_830_98 * y)
                        + z * (-1190.914_967_948_748
                            + (298.904_564_555_024 - 145.949_167_600_635_2 * z) * z))
                    + z * (2082.734_442_399_804_3
                        + z * (-614.668_925_894_709
                            + (340.685_093_521_782 - 33.384_820_297_923_9 * z) * z)))
                + z * (-1721.528_607_567_954
                    + z * (674.819_060_538_734
                        + z * (-356.629_112_415_276
                            + (88.408_071_661_6 - 15.840_030_944_233_64 * z) * z)))));

    -(g03 + g08) * 0.025
}

/// Second temperature derivative of the Gibbs function at the sea surface.
fn gibbs_tt_surface(absolute_salinity: f64, potential_temp: f64) -> f64 {
    let x2 = SFAC * absolute_salinity;
    let x = x2.sqrt();
    let y = potential_temp * 0.025;

    let g03 = -24_715.571_866_078
        + y * (4420.447_224_909_672_5
            + y * (-1778.231_237_203_896
                + y * (1160.518_251_685_141_9
                    + y * (-569.531_539_542_516 + y * 128.134_291_524_946_15))));

    let g08 = x2
        * (1760.062_705_994_408
            + x * (-86.132_935_195_608_4
                + x * (-137.114_501_840_898_2
                    + y * (296.200_616_913_752_36
                        + y * (-205.677_092_903_745_63 + 49.939_401_913_901_6 * y)))
                + y * (-60.136_422_517_125 + y * 10.507_207_941_707_34))
            + y * (-1351.605_895_580_406
                + y * (1097.112_537_301_510_9
                    + y * (-433.206_481_750_622_06 + 63.905_091_254_154_904 * y))));

    (g03 + g08) * 0.000_625
}

/// Potential temperature referenced to the sea surface.
///
/// Starts from a polynomial estimate and takes two modified Newton steps on
/// entropy, which converges to machine precision over the oceanographic
/// range.
pub fn potential_temperature(absolute_salinity: f64, temperature: f64, pressure: f64) -> f64 {
    let sa = absolute_salinity;
    let t = temperature;
    let p = pressure;
    let s1 = sa / UPS;

    let mut pt0 = t
        + p * (8.654_839_133_954_42e-6 - s1 * 1.416_362_997_448_81e-6 - p * 7.382_864_671_357_37e-9
            + t * (-8.382_413_570_396_98e-6
                + s1 * 2.839_333_685_855_34e-8
                + t * 1.778_039_652_186_56e-8
                + p * 1.711_556_192_082_33e-10));

    let mut dentropy_dt = CP0 / ((T0 + pt0) * (1.0 - 0.05 * (1.0 - sa / SSO)));
    let true_entropy = entropy_part(sa, t, p);

    for _ in 0..2 {
        let previous = pt0;
        let dentropy = entropy_part(sa, previous, 0.0) - true_entropy;
        pt0 = previous - dentropy / dentropy_dt;
        let midpoint = 0.5 * (pt0 + previous);
        dentropy_dt = -gibbs_tt_surface(sa, midpoint);
        pt0 = previous - dentropy / dentropy_dt;
    }
    pt0
}

/// Conservative temperature Θ from in-situ temperature.
pub fn conservative_temperature(absolute_salinity: f64, temperature: f64, pressure: f64) -> f64 {
    conservative_from_potential(
        absolute_salinity,
        potential_temperature(absolute_salinity, temperature, pressure),
    )
}

/// Every derived quantity for a single (SA, t, p) sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleProperties {
    pub potential_temperature: f64,
    pub conservative_temperature: f64,
    pub density: f64,
    pub sigma0: f64,
    pub sigma2: f64,
    pub sigma4: f64,
}

impl SampleProperties {
    pub fn compute(absolute_salinity: f64, temperature: f64, pressure: f64) -> Self {
        let sa = absolute_salinity;
        let theta = potential_temperature(sa, temperature, pressure);
        let ct = conservative_from_potential(sa, theta);
        Self {
            potential_temperature: theta,
            conservative_temperature: ct,
            density: density(sa, ct, pressure),
            sigma0: sigma0(sa, ct),
            sigma2: sigma2(sa, ct),
            sigma4: sigma4(sa, ct),
        }
    }
}

/// Derived thermodynamic profiles of a station cast.
///
/// The `potential_density_*` fields are full densities, i.e. the sigma
/// anomaly plus [`SIGMA_OFFSET`].
#[derive(Debug, Clone)]
pub struct ProfileProperties {
    pub potential_temperature: Array1<f64>,
    pub conservative_temperature: Array1<f64>,
    pub density: Array1<f64>,
    pub potential_density_0: Array1<f64>,
    pub potential_density_2000: Array1<f64>,
    pub potential_density_4000: Array1<f64>,
}

impl ProfileProperties {
    /// Evaluate every property for each sample, in parallel.
    pub fn compute(
        salinity: ArrayView1<'_, f64>,
        temperature: ArrayView1<'_, f64>,
        pressure: ArrayView1<'_, f64>,
    ) -> Result<Self> {
        if salinity.len() != temperature.len() || salinity.len() != pressure.len() {
            return Err(OceanDiagError::ShapeMismatch {
                message: format!(
                    "salinity, temperature and pressure lengths differ: {}, {}, {}",
                    salinity.len(),
                    temperature.len(),
                    pressure.len()
                ),
            });
        }

        let samples = Zip::from(&salinity)
            .and(&temperature)
            .and(&pressure)
            .par_map_collect(|&s, &t, &p| SampleProperties::compute(s, t, p));

        tracing::debug!(samples = samples.len(), "computed seawater properties");

        Ok(Self {
            potential_temperature: samples.mapv(|x| x.potential_temperature),
            conservative_temperature: samples.mapv(|x| x.conservative_temperature),
            density: samples.mapv(|x| x.density),
            potential_density_0: samples.mapv(|x| x.sigma0 + SIGMA_OFFSET),
            potential_density_2000: samples.mapv(|x| x.sigma2 + SIGMA_OFFSET),
            potential_density_4000: samples.mapv(|x| x.sigma4 + SIGMA_OFFSET),
        })
    }

    pub fn len(&self) -> usize {
        self.density.len()
    }

    pub fn is_empty(&self) -> bool {
        self.density.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    // TEOS-10 check casts: (SA, t, p) with the published θ, Θ and ρ(SA, Θ, p).
    const CHECK_SA: [f64; 6] = [34.7118, 34.8915, 35.0256, 34.8472, 34.7366, 34.7324];
    const CHECK_T: [f64; 6] = [28.7856, 28.4329, 22.8103, 10.2600, 6.8863, 4.4036];
    const CHECK_P: [f64; 6] = [10.0, 50.0, 125.0, 250.0, 600.0, 1000.0];
    const CHECK_PT0: [f64; 6] = [
        28.783196819670632,
        28.420983342398962,
        22.784930399117108,
        10.230523661095731,
        6.829230224409661,
        4.324510571845719,
    ];
    const CHECK_CT: [f64; 6] = [
        28.809919826700281,
        28.439227816091140,
        22.786176893078498,
        10.226189266620782,
        6.827213633479988,
        4.323575748610455,
    ];
    const CHECK_RHO: [f64; 6] = [
        1021.839935738108,
        1022.262457966867,
        1024.427195413316,
        1027.790152169745,
        1029.837779492990,
        1032.002453130403,
    ];

    #[test]
    fn test_potential_temperature_check_values() {
        for i in 0..6 {
            let pt = potential_temperature(CHECK_SA[i], CHECK_T[i], CHECK_P[i]);
            assert!((pt - CHECK_PT0[i]).abs() < 1e-9, "cast {}: {}", i, pt);
        }
        assert_eq!(potential_temperature(35.0, 10.0, 0.0), 10.0);
    }

    #[test]
    fn test_conservative_temperature_check_values() {
        for i in 0..6 {
            let ct = conservative_temperature(CHECK_SA[i], CHECK_T[i], CHECK_P[i]);
            assert!((ct - CHECK_CT[i]).abs() < 1e-9, "cast {}: {}", i, ct);
        }
        // zero potential enthalpy at the reference state
        assert!(conservative_from_potential(SSO, 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_density_check_values() {
        for i in 0..6 {
            let rho = density(CHECK_SA[i], CHECK_CT[i], CHECK_P[i]);
            assert!((rho - CHECK_RHO[i]).abs() < 1e-4, "cast {}: {}", i, rho);
        }
        // IAPWS-08 standard seawater at 0 °C and the surface
        assert!((density(SSO, 0.0, 0.0) - 1028.1072).abs() < 1e-3);
        assert_eq!(SPECVOL.len(), 75);
    }

    #[test]
    fn test_sigma_values() {
        let ct = conservative_temperature(35.0, 2.0, 4000.0);
        assert!((ct - 1.66413).abs() < 1e-4);
        assert!((sigma0(35.0, ct) - 27.8665).abs() < 1e-3);
        assert!((sigma2(35.0, ct) - 37.0871).abs() < 1e-3);
        assert_eq!(sigma4(35.0, ct), density(35.0, ct, 4000.0) - SIGMA_OFFSET);
        assert!(sigma0(35.0, ct) < sigma2(35.0, ct));
        assert!(sigma2(35.0, ct) < sigma4(35.0, ct));
    }

    #[test]
    fn test_profile_properties_offsets() {
        let s = arr1(&[36.5, 35.0, 34.9]);
        let t = arr1(&[24.0, 8.0, 2.0]);
        let p = arr1(&[0.0, 1000.0, 4000.0]);
        let props = ProfileProperties::compute(s.view(), t.view(), p.view()).unwrap();
        assert_eq!(props.len(), 3);

        for i in 0..3 {
            let ct = conservative_temperature(s[i], t[i], p[i]);
            assert_eq!(props.conservative_temperature[i], ct);
            assert_eq!(props.potential_density_0[i], sigma0(s[i], ct) + SIGMA_OFFSET);
            assert_eq!(props.potential_density_2000[i], sigma2(s[i], ct) + SIGMA_OFFSET);
            assert_eq!(props.potential_density_4000[i], sigma4(s[i], ct) + SIGMA_OFFSET);
            assert_eq!(props.density[i], density(s[i], ct, p[i]));
        }
        assert_eq!(props.potential_temperature[0], 24.0);
    }

    #[test]
    fn test_profile_properties_nan_and_shape() {
        let s = arr1(&[35.0, f64::NAN]);
        let t = arr1(&[10.0, 10.0]);
        let p = arr1(&[0.0, 100.0]);
        let props = ProfileProperties::compute(s.view(), t.view(), p.view()).unwrap();
        assert!(props.density[0].is_finite());
        assert!(props.density[1].is_nan());
        assert!(props.potential_density_0[1].is_nan());

        let short = arr1(&[0.0]);
        assert!(matches!(
            ProfileProperties::compute(s.view(), t.view(), short.view()),
            Err(OceanDiagError::ShapeMismatch { .. })
        ));
    }
}
