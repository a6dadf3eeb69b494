//! Markdown feedback reporter
//!
//! Produces the document handed back to the student: who was evaluated,
//! the score with an encouraging comment, findings, pinpointed issues,
//! next steps, learning resources and the rubric criteria.

use crate::models::{EvaluationResult, Niveau, Severity, TechnicalDetail};
use crate::reporters::FeedbackContext;
use anyhow::Result;
use chrono::Local;

/// Render the feedback document, stamped with the current local time
pub fn render(result: &EvaluationResult, ctx: &FeedbackContext) -> Result<String> {
    let timestamp = Local::now().format("%d/%m/%Y %H:%M").to_string();
    Ok(render_at(result, ctx, &timestamp))
}

/// Render the feedback document with a fixed timestamp
pub fn render_at(result: &EvaluationResult, ctx: &FeedbackContext, timestamp: &str) -> String {
    let sections = [
        render_header(ctx, timestamp),
        render_score(result, ctx),
        render_list(
            "## ✅ Points Forts",
            &result.strengths,
            "🎯",
            "- 💪 Continue tes efforts, tu es sur la bonne voie !",
        ),
        render_list(
            "## 🔧 Axes d'Amélioration",
            &result.improvements,
            "📈",
            "- ✨ Excellent travail, peu d'améliorations nécessaires !",
        ),
        render_technical_details(&result.technical_details),
        render_recommendations(&result.recommendations, ctx.niveau),
        render_resources(&ctx.competence),
        render_criteria(ctx),
        render_footer(ctx, timestamp),
    ];
    sections.join("\n---\n\n")
}

fn render_header(ctx: &FeedbackContext, timestamp: &str) -> String {
    let repository = if ctx.repository_url.is_empty() {
        "Dépôt local".to_string()
    } else {
        format!(
            "[{}]({})",
            crate::sources::repo_name(&ctx.repository_url),
            ctx.repository_url
        )
    };

    format!(
        r#"# 📝 Feedback Automatique

> **Évaluation générée automatiquement le {}**

## 👤 Informations
- **Étudiant:** {}
- **Repository:** {}
- **Compétence évaluée:** {}
- **Niveau:** {} {}
"#,
        timestamp,
        ctx.student,
        repository,
        ctx.competence,
        niveau_emoji(ctx.niveau),
        ctx.niveau.label()
    )
}

fn render_score(result: &EvaluationResult, ctx: &FeedbackContext) -> String {
    let pct = ctx.percentage(result.score);
    format!(
        r#"## 📊 Résultat Global

### Note: {}/{} {}

{}

### Résumé
{}
"#,
        result.score,
        ctx.rubric.score_max,
        score_emoji(pct),
        score_comment(pct, ctx.niveau),
        result.summary
    )
}

fn render_list(title: &str, items: &[String], bullet: &str, empty: &str) -> String {
    let mut md = format!("{}\n\n", title);
    if items.is_empty() {
        md.push_str(empty);
        md.push('\n');
    } else {
        for item in items {
            md.push_str(&format!("- {} {}\n", bullet, item));
        }
    }
    md
}

fn render_technical_details(details: &[TechnicalDetail]) -> String {
    let mut md = String::from("## 🔍 Détails Techniques\n\n");

    if details.is_empty() {
        md.push_str("✅ Aucun problème technique majeur détecté.\n");
        return md;
    }

    let blocks: Vec<String> = details
        .iter()
        .map(|d| {
            let line = d
                .line
                .map(|l| format!(" (ligne {})", l))
                .unwrap_or_default();
            format!(
                "### {} {}{}\n**Problème:** {}\n**Suggestion:** {}\n",
                severity_icon(d.severity),
                d.file,
                line,
                d.issue,
                d.suggestion
            )
        })
        .collect();
    md.push_str(&blocks.join("\n"));
    md
}

fn render_recommendations(recommendations: &[String], niveau: Niveau) -> String {
    let mut md = String::from("## 💡 Recommandations pour Progresser\n\n");
    if recommendations.is_empty() {
        for rec in default_recommendations(niveau) {
            md.push_str(&format!("- {}\n", rec));
        }
    } else {
        for rec in recommendations {
            md.push_str(&format!("- 💭 {}\n", rec));
        }
    }
    md
}

fn render_resources(competence: &str) -> String {
    let mut md = String::from("## 📚 Ressources Utiles\n\n");
    for resource in resources_for(competence) {
        md.push_str(&format!("- {}\n", resource));
    }
    md
}

fn render_criteria(ctx: &FeedbackContext) -> String {
    let criteria = ctx.rubric.criteria();
    let mut md = String::from("## 📋 Barème\n\n");

    if criteria.is_empty() {
        md.push_str(&format!(
            "Aucun critère chiffré : note calculée sur {} points.\n",
            ctx.rubric.score_max
        ));
        return md;
    }

    md.push_str("| Critère | Points |\n|---------|--------|\n");
    for c in &criteria {
        md.push_str(&format!("| {} | {} |\n", c.label, c.points));
    }
    md.push_str(&format!("| **Total** | **{}** |\n", ctx.rubric.score_max));
    md
}

fn render_footer(ctx: &FeedbackContext, timestamp: &str) -> String {
    format!(
        r#"## 🤖 À Propos de cette Évaluation

Cette évaluation a été générée automatiquement à partir de règles d'analyse statiques. Elle analyse votre code selon les critères définis pour la compétence "{}" et votre niveau "{}".

### Prochaines Étapes
1. 📖 Lisez attentivement les points d'amélioration
2. 🔄 Implémentez les suggestions proposées
3. 💬 N'hésitez pas à demander de l'aide à votre formateur
4. 🚀 Continuez à pratiquer pour consolider vos acquis

<sub>🔄 Dernière mise à jour: {} | Système d'évaluation automatique v{}</sub>
"#,
        ctx.competence,
        ctx.niveau.label(),
        timestamp,
        env!("CARGO_PKG_VERSION")
    )
}

fn niveau_emoji(niveau: Niveau) -> &'static str {
    match niveau {
        Niveau::Debutant => "🌱",
        Niveau::Intermediaire => "🌿",
        Niveau::Avance => "🌳",
    }
}

fn score_emoji(pct: u32) -> &'static str {
    match pct {
        90.. => "🏆",
        75.. => "🥉",
        60.. => "👍",
        50.. => "📈",
        _ => "💪",
    }
}

fn score_comment(pct: u32, niveau: Niveau) -> &'static str {
    match pct {
        90.. => "🌟 **Excellent travail !** Vous maîtrisez très bien cette compétence.",
        75.. => "✨ **Très bon travail !** Quelques petits détails à peaufiner.",
        60.. => "👌 **Bon travail !** Vous êtes sur la bonne voie, continuez vos efforts.",
        50.. => "📚 **Travail correct.** Il y a encore quelques concepts à consolider.",
        _ if niveau == Niveau::Debutant => {
            "🌱 **Bon début !** C'est normal d'avoir des difficultés au début, persévérez !"
        }
        _ => "💪 **Il faut persévérer !** Revoir les bases et pratiquer davantage vous aidera.",
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "🚫",
        Severity::Warning => "⚠️",
        Severity::Info => "ℹ️",
    }
}

fn default_recommendations(niveau: Niveau) -> &'static [&'static str] {
    match niveau {
        Niveau::Debutant => &[
            "📖 Revoir les concepts de base régulièrement",
            "🔄 Pratiquer avec des exercices simples",
            "💬 Poser des questions à votre formateur",
            "👥 Échanger avec d'autres apprenants",
        ],
        Niveau::Intermediaire => &[
            "🚀 Approfondir les concepts avancés",
            "🔍 Analyser du code existant de qualité",
            "📝 Documenter votre code",
            "🧪 Tester différentes approches",
        ],
        Niveau::Avance => &[
            "🏗️ Mettre l'accent sur l'architecture",
            "⚡ Optimiser les performances",
            "📋 Respecter les bonnes pratiques",
            "🔧 Utiliser des outils de développement avancés",
        ],
    }
}

/// Learning resources, matched on the competence label (first match wins)
fn resources_for(competence: &str) -> &'static [&'static str] {
    let lower = competence.to_lowercase();
    if lower.contains("css") {
        &[
            "📖 [MDN CSS](https://developer.mozilla.org/fr/docs/Web/CSS)",
            "🎨 [CSS-Tricks](https://css-tricks.com/)",
            "🎮 [Flexbox Froggy](https://flexboxfroggy.com/#fr)",
            "📱 [CSS Grid Garden](https://cssgridgarden.com/#fr)",
        ]
    } else if lower.contains("javascript") {
        &[
            "📖 [MDN JavaScript](https://developer.mozilla.org/fr/docs/Web/JavaScript)",
            "📚 [JavaScript.info](https://javascript.info/)",
            "🎯 [Exercism JavaScript](https://exercism.org/tracks/javascript)",
            "🔥 [freeCodeCamp](https://www.freecodecamp.org/)",
        ]
    } else if lower.contains("html") {
        &[
            "📖 [MDN HTML](https://developer.mozilla.org/fr/docs/Web/HTML)",
            "🎯 [HTML5 Semantic Elements](https://www.w3schools.com/html/html5_semantic_elements.asp)",
            "♿ [Accessibilité Web](https://www.w3.org/WAI/)",
            "✅ [HTML Validator](https://validator.w3.org/)",
        ]
    } else {
        &[
            "📖 [MDN Web Docs](https://developer.mozilla.org/fr/)",
            "🎓 [freeCodeCamp](https://www.freecodecamp.org/)",
            "💻 [W3Schools](https://www.w3schools.com/)",
            "🚀 [Frontend Mentor](https://www.frontendmentor.io/)",
        ]
    }
}
