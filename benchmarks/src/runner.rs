use std::net::{Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use hyper::{client::HttpConnector, Client, StatusCode, Uri};
use serde_json::{json, Value};

use jwt_bench_config::{HarnessConfig, Scheme};

use crate::{
    dataset::{Dataset, Group},
    error::HarnessError,
    models::Record,
    server::{self, TokenService, GENERATE_NS_HEADER},
    token::{signer_for, verify_token, TokenSigner},
};

pub const LOG_TARGET: &str = "jwt-bench::runner";

/// Claims carried by every benchmarked token.
pub fn benchmark_claims() -> Value {
    json!({ "data": "this is a signed token" })
}

/// A token fetched from the service together with what it cost.
struct Fetched {
    token: String,
    generate: Duration,
    transfer: Duration,
}

async fn fetch_token(
    client: &Client<HttpConnector>,
    addr: SocketAddr,
    scheme: Scheme,
) -> Result<Fetched, HarnessError> {
    let uri: Uri = format!("http://{}{}", addr, scheme.route())
        .parse()
        .map_err(hyper::http::Error::from)?;

    let start = Instant::now();
    let response = client.get(uri).await?;
    let status = response.status();
    let generate_ns = response
        .headers()
        .get(GENERATE_NS_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());
    let body = hyper::body::to_bytes(response.into_body()).await?;
    let transfer = start.elapsed();

    if status != StatusCode::OK {
        return Err(HarnessError::UnexpectedStatus { scheme, status });
    }
    let generate_ns = generate_ns.ok_or(HarnessError::MissingTiming(scheme))?;

    Ok(Fetched {
        token: serde_json::from_slice(&body)?,
        generate: Duration::from_nanos(generate_ns),
        transfer,
    })
}

/// Generate one key per scheme. RSA key generation runs off the async workers.
pub async fn generate_signers(
    rsa_bits: usize,
) -> Result<Vec<(Scheme, Box<dyn TokenSigner>)>, HarnessError> {
    let mut signers = Vec::with_capacity(Scheme::ALL.len());
    for scheme in Scheme::ALL {
        let signer = tokio::task::spawn_blocking(move || signer_for(scheme, rsa_bits)).await??;
        signers.push((scheme, signer));
    }
    Ok(signers)
}

/// Measure `trials` token requests per scheme against a local token service.
///
/// Each scheme is fetched and verified once before measuring starts. Trials
/// request the schemes in turn, so every scheme sees the same conditions.
pub async fn run_benchmark(config: &HarnessConfig, trials: usize) -> Result<Dataset, HarnessError> {
    let signers = generate_signers(config.rsa_bits).await?;
    let service = TokenService::new(signers, benchmark_claims());

    let handle = server::spawn(
        service.clone(),
        SocketAddr::from((Ipv4Addr::LOCALHOST, config.port)),
    )?;
    let addr = handle.local_addr();
    let client = Client::new();

    for scheme in Scheme::ALL {
        let fetched = fetch_token(&client, addr, scheme).await?;
        if let Some(signer) = service.signer(scheme) {
            verify_token(signer, &fetched.token)?;
        }
        tracing::debug!(
            target: LOG_TARGET,
            %scheme,
            token = %fetched.token,
            "warm-up token verified",
        );
    }

    let mut groups: Vec<(Scheme, Group)> = Scheme::ALL
        .into_iter()
        .map(|scheme| (scheme, Group::with_capacity(trials)))
        .collect();

    let start = Instant::now();
    for trial in 0..trials {
        for (scheme, group) in groups.iter_mut() {
            let fetched = fetch_token(&client, addr, *scheme).await?;
            group.push(Record::new(
                fetched.generate.as_nanos() as u64,
                fetched.token.len() as u64,
                fetched.transfer.as_nanos() as u64,
            ));
        }
        tracing::debug!(target: LOG_TARGET, trial, "trial complete");
    }

    tracing::info!(
        target: LOG_TARGET,
        trials,
        elapsed = ?start.elapsed(),
        "benchmark complete",
    );

    drop(client);
    handle.shutdown().await?;

    Ok(Dataset::new(groups))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> HarnessConfig {
        HarnessConfig {
            port: 0,
            rsa_bits: 512,
            ..HarnessConfig::default()
        }
    }

    #[tokio::test]
    async fn records_every_trial() {
        let dataset = run_benchmark(&test_config(), 3).await.unwrap();

        let schemes: Vec<_> = dataset.groups().iter().map(|(s, _)| *s).collect();
        assert_eq!(schemes, Scheme::ALL);

        for (scheme, group) in dataset.groups() {
            assert_eq!(group.len(), 3, "{scheme}");
            for record in group {
                assert!(record.size_bytes > 0);
                assert!(record.transfer_ns > 0);
                assert!(record.transfer_ns >= record.generate_ns);
            }
        }
    }

    #[tokio::test]
    async fn token_sizes_follow_signature_sizes() {
        let dataset = run_benchmark(&test_config(), 1).await.unwrap();
        let size = |scheme| dataset.group(scheme).unwrap()[0].size_bytes;

        // Same header length for all three; signatures are 64, 64 and 32 bytes.
        assert_eq!(size(Scheme::Rsa), size(Scheme::Ecdsa));
        assert!(size(Scheme::Hmac) < size(Scheme::Ecdsa));
    }

    #[tokio::test]
    async fn zero_trials_yield_empty_groups() {
        let dataset = run_benchmark(&test_config(), 0).await.unwrap();
        assert!(dataset.groups().iter().all(|(_, group)| group.is_empty()));
    }
}
