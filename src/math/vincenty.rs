//!
//! Vincenty direct and inverse geodesic solutions on an oblate ellipsoid.
//!
//! Used by the oblique/equatorial branch of the ellipsoidal azimuthal
//! equidistant projection, which needs the true geodesic azimuth and
//! distance between the projection center and a given point (forward) and
//! the destination point reached by a given azimuth/distance from the
//! center (inverse).
//!
use crate::errors::{Error, Result};

const MAX_ITER: usize = 100;
const TOL: f64 = 1.0e-12;

/// Forward geodesic problem: given a start point, azimuth and distance,
/// find the destination point and the reverse azimuth there.
///
/// Returns `(lat2, lon2, reverse_azimuth)`, all in radians.
pub(crate) fn vincenty_direct(
    lat1: f64,
    lon1: f64,
    alpha1: f64,
    s: f64,
    a: f64,
    f: f64,
) -> Result<(f64, f64, f64)> {
    let b = a * (1. - f);
    let tan_u1 = (1. - f) * lat1.tan();
    let cos_u1 = 1. / (1. + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;

    let sin_alpha1 = alpha1.sin();
    let cos_alpha1 = alpha1.cos();

    let sigma1 = sin_u1.atan2(cos_u1 * cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1. - sin_alpha * sin_alpha;
    let u_sq = if cos_sq_alpha.abs() < f64::EPSILON {
        0.
    } else {
        cos_sq_alpha * (a * a - b * b) / (b * b)
    };
    let big_a = 1. + u_sq / 16384. * (4096. + u_sq * (-768. + u_sq * (320. - 175. * u_sq)));
    let big_b = u_sq / 1024. * (256. + u_sq * (-128. + u_sq * (74. - 47. * u_sq)));

    let mut sigma = s / (b * big_a);
    let mut cos2sigma_m;
    let mut converged = false;
    for _ in 0..MAX_ITER {
        cos2sigma_m = (2. * sigma1 + sigma).cos();
        let sin_sigma = sigma.sin();
        let cos_sigma = sigma.cos();
        let delta_sigma = big_b
            * sin_sigma
            * (cos2sigma_m
                + big_b / 4.
                    * (cos_sigma * (-1. + 2. * cos2sigma_m * cos2sigma_m)
                        - big_b / 6.
                            * cos2sigma_m
                            * (-3. + 4. * sin_sigma * sin_sigma)
                            * (-3. + 4. * cos2sigma_m * cos2sigma_m)));
        let sigma_new = s / (b * big_a) + delta_sigma;
        if (sigma_new - sigma).abs() < TOL {
            sigma = sigma_new;
            converged = true;
            break;
        }
        sigma = sigma_new;
    }
    if !converged {
        return Err(Error::ToleranceConditionError);
    }

    let sin_sigma = sigma.sin();
    let cos_sigma = sigma.cos();
    let cos2sigma_m = (2. * sigma1 + sigma).cos();

    let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
        .atan2((1. - f) * (sin_alpha * sin_alpha + (sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1).powi(2)).sqrt());

    let lambda = (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
    let c = f / 16. * cos_sq_alpha * (4. + f * (4. - 3. * cos_sq_alpha));
    let big_l = lambda
        - (1. - c) * f * sin_alpha * (sigma + c * sin_sigma * (cos2sigma_m + c * cos_sigma * (-1. + 2. * cos2sigma_m * cos2sigma_m)));

    let lon2 = lon1 + big_l;
    let alpha2 = sin_alpha.atan2(-sin_u1 * sin_sigma + cos_u1 * cos_sigma * cos_alpha1);

    Ok((lat2, lon2, alpha2))
}

/// Inverse geodesic problem: given two points, find the forward azimuth at
/// the first, the reverse azimuth at the second, and the geodesic distance.
///
/// Returns `(alpha1, alpha2, distance)`.
pub(crate) fn vincenty_inverse(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    a: f64,
    f: f64,
) -> Result<(f64, f64, f64)> {
    let b = a * (1. - f);
    let big_l = lon2 - lon1;

    let tan_u1 = (1. - f) * lat1.tan();
    let cos_u1 = 1. / (1. + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;
    let tan_u2 = (1. - f) * lat2.tan();
    let cos_u2 = 1. / (1. + tan_u2 * tan_u2).sqrt();
    let sin_u2 = tan_u2 * cos_u2;

    let mut lambda = big_l;
    let mut cos_sq_alpha;
    let mut sin_sigma;
    let mut cos_sigma;
    let mut sigma;
    let mut cos2sigma_m;
    let mut converged = false;

    let mut sin_alpha = 0.;

    for _ in 0..MAX_ITER {
        let sin_lambda = lambda.sin();
        let cos_lambda = lambda.cos();
        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma.abs() < f64::EPSILON {
            // coincident points
            return Ok((0., 0., 0.));
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);
        sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1. - sin_alpha * sin_alpha;
        cos2sigma_m = if cos_sq_alpha.abs() < f64::EPSILON {
            0.
        } else {
            cos_sigma - 2. * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = f / 16. * cos_sq_alpha * (4. + f * (4. - 3. * cos_sq_alpha));
        let lambda_new = big_l
            + (1. - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos2sigma_m + c * cos_sigma * (-1. + 2. * cos2sigma_m * cos2sigma_m)));
        if (lambda_new - lambda).abs() < TOL {
            lambda = lambda_new;
            converged = true;
            break;
        }
        lambda = lambda_new;
    }
    if !converged {
        return Err(Error::ToleranceConditionError);
    }

    let sin_lambda = lambda.sin();
    let cos_lambda = lambda.cos();
    let sin_sigma_f = ((cos_u2 * sin_lambda).powi(2)
        + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
    .sqrt();
    let cos_sigma_f = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
    let sigma_f = sin_sigma_f.atan2(cos_sigma_f);
    let cos_sq_alpha_f = 1. - sin_alpha * sin_alpha;
    let cos2sigma_m_f = if cos_sq_alpha_f.abs() < f64::EPSILON {
        0.
    } else {
        cos_sigma_f - 2. * sin_u1 * sin_u2 / cos_sq_alpha_f
    };

    let u_sq = cos_sq_alpha_f * (a * a - b * b) / (b * b);
    let big_a = 1. + u_sq / 16384. * (4096. + u_sq * (-768. + u_sq * (320. - 175. * u_sq)));
    let big_b = u_sq / 1024. * (256. + u_sq * (-128. + u_sq * (74. - 47. * u_sq)));
    let delta_sigma = big_b
        * sin_sigma_f
        * (cos2sigma_m_f
            + big_b / 4.
                * (cos_sigma_f * (-1. + 2. * cos2sigma_m_f * cos2sigma_m_f)
                    - big_b / 6.
                        * cos2sigma_m_f
                        * (-3. + 4. * sin_sigma_f * sin_sigma_f)
                        * (-3. + 4. * cos2sigma_m_f * cos2sigma_m_f)));

    let distance = b * big_a * (sigma_f - delta_sigma);
    let alpha1 = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
    let alpha2 = (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

    Ok((alpha1, alpha2, distance))
}
