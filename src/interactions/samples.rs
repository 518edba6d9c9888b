// Fixed sample datasets: shown whenever the sheet yields nothing.

use super::models::{Interaction, InteractionKind, Sentiment};

fn sample(
    kind: InteractionKind,
    profile_id: &str,
    handle: Option<&str>,
    text: &str,
    date: &str,
    time: &str,
    sentiment: Sentiment,
) -> Interaction {
    Interaction {
        kind,
        profile_id: profile_id.to_string(),
        handle: handle.map(str::to_string),
        text: text.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        timestamp: format!("{date}T{time}:00"),
        sentiment: Some(sentiment),
    }
}

/// Sample direct messages.
pub fn sample_direct_messages() -> Vec<Interaction> {
    let dm = InteractionKind::DirectMessage;
    vec![
        sample(
            dm,
            "12345",
            Some("maria_silva"),
            "Adorei os produtos! Quando chega meu pedido?",
            "2025-01-15",
            "14:30",
            Sentiment::Positive,
        ),
        sample(
            dm,
            "67890",
            Some("joao_costa"),
            "Não recebi meu pedido ainda",
            "2025-01-15",
            "13:15",
            Sentiment::Negative,
        ),
        sample(
            dm,
            "54321",
            None,
            "Qual o prazo de entrega?",
            "2025-01-15",
            "12:00",
            Sentiment::Neutral,
        ),
    ]
}

/// Sample comments. Every comment carries a handle.
pub fn sample_comments() -> Vec<Interaction> {
    let c = InteractionKind::Comment;
    vec![
        sample(
            c,
            "98765",
            Some("ana_beauty"),
            "Produtos incríveis! Super recomendo ❤️",
            "2025-01-15",
            "15:45",
            Sentiment::Positive,
        ),
        sample(
            c,
            "45678",
            Some("carlos_makeup"),
            "Quando terá promoção?",
            "2025-01-15",
            "14:20",
            Sentiment::Neutral,
        ),
    ]
}

/// The sample dataset for a given kind.
pub fn sample_interactions(kind: InteractionKind) -> Vec<Interaction> {
    match kind {
        InteractionKind::DirectMessage => sample_direct_messages(),
        InteractionKind::Comment => sample_comments(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_match_their_kind() {
        for kind in [InteractionKind::DirectMessage, InteractionKind::Comment] {
            let rows = sample_interactions(kind);
            assert!(!rows.is_empty());
            assert!(rows.iter().all(|i| i.kind == kind));
            assert!(rows.iter().all(|i| i.occurred_at().is_some()));
        }
    }

    #[test]
    fn test_sample_comments_all_have_handles() {
        assert!(sample_comments().iter().all(|i| i.handle().is_some()));
    }
}
