//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! Adds restrictive security headers to all responses. Start locked down and
//! loosen only when specific functionality requires it - the Razorpay
//! checkout script and frame are the only third-party allowances.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY` - Prevent clickjacking
/// - `X-Content-Type-Options: nosniff` - Prevent MIME sniffing
/// - `Referrer-Policy: no-referrer` - Zero referrer leakage
/// - `Content-Security-Policy` - Strict CSP (see below)
/// - `Permissions-Policy` - Deny sensitive features; `payment` stays open
///   for the Razorpay checkout frame
/// - `Cache-Control: no-store, max-age=0` - Prevent caching sensitive data
/// - `Cross-Origin-Opener-Policy: same-origin` - Process isolation
/// - `X-DNS-Prefetch-Control: off` - Prevent DNS prefetch leakage
///
/// # CSP Policy
///
/// ```text
/// default-src 'none';
/// script-src 'self' https://checkout.razorpay.com;
/// style-src 'self';
/// font-src 'self';
/// img-src 'self' https://cdn.azlok.com data:;
/// connect-src 'self' https://api.razorpay.com https://lumberjack.razorpay.com;
/// frame-src https://api.razorpay.com https://checkout.razorpay.com;
/// object-src 'none';
/// base-uri 'self';
/// form-action 'self';
/// frame-ancestors 'none';
/// upgrade-insecure-requests
/// ```
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    // Prevent clickjacking
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // Prevent MIME sniffing
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));

    // Zero referrer leakage (stricter than same-origin)
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    // Strict CSP - Razorpay checkout is the only third-party script/frame
    headers.insert(
        CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(
            "default-src 'none'; \
             script-src 'self' https://checkout.razorpay.com; \
             style-src 'self'; \
             font-src 'self'; \
             img-src 'self' https://cdn.azlok.com data:; \
             connect-src 'self' https://api.razorpay.com https://lumberjack.razorpay.com; \
             frame-src https://api.razorpay.com https://checkout.razorpay.com; \
             object-src 'none'; \
             base-uri 'self'; \
             form-action 'self'; \
             frame-ancestors 'none'; \
             upgrade-insecure-requests",
        ),
    );

    // Deny sensitive features; the Razorpay frame needs payment
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "accelerometer=(), \
             camera=(), \
             display-capture=(), \
             encrypted-media=(), \
             fullscreen=(), \
             geolocation=(), \
             gyroscope=(), \
             hid=(), \
             idle-detection=(), \
             interest-cohort=(), \
             magnetometer=(), \
             microphone=(), \
             midi=(), \
             payment=(self \"https://api.razorpay.com\" \"https://checkout.razorpay.com\"), \
             picture-in-picture=(), \
             screen-wake-lock=(), \
             serial=(), \
             sync-xhr=(), \
             usb=(), \
             web-share=(), \
             xr-spatial-tracking=()",
        ),
    );

    // Prevent caching of sensitive responses
    headers.insert(
        HeaderName::from_static("cache-control"),
        HeaderValue::from_static("no-store, max-age=0"),
    );

    // Cross-Origin policies for additional isolation
    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    // Prevent DNS prefetching to avoid leaking which links user hovers over
    headers.insert(
        HeaderName::from_static("x-dns-prefetch-control"),
        HeaderValue::from_static("off"),
    );

    response
}
