use contracts_proto::Participant;
use maud::{Markup, html};

/// Read-only summary of one participant.
pub fn participant_card(participant: &Participant) -> Markup {
    let certificate = participant.certificate_text();
    html! {
        article class="cr-card cr-participant" {
            h3 { (participant.name) }
            dl {
                dt { "Certificate Digest (SHA-256 Hash)" }
                dd { code { (participant.hash) } }
                dt { "Public Certificate" }
                dd { pre { (certificate.trim()) } }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_shows_digest_and_trimmed_certificate() {
        let participant = Participant {
            name: "Cluster A".to_string(),
            public_key: b"\n-----BEGIN CERTIFICATE-----\nabc\n-----END CERTIFICATE-----\n\n"
                .to_vec(),
            hash: "deadbeef".to_string(),
        };

        let html = participant_card(&participant).into_string();
        assert!(html.contains("<h3>Cluster A</h3>"));
        assert!(html.contains("Certificate Digest (SHA-256 Hash)"));
        assert!(html.contains("<code>deadbeef</code>"));
        assert!(html.contains(
            "<pre>-----BEGIN CERTIFICATE-----\nabc\n-----END CERTIFICATE-----</pre>"
        ));
    }
}
