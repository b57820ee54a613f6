//! Built-in natal chart questionnaire.

use crate::spec::form::FormSpec;
use crate::spec::question::{ImageChoice, QuestionSpec};

pub const NATAL_CHART_ID: &str = "carta-natal";

const LIKERT_MIN: i64 = 1;
const LIKERT_MAX: i64 = 5;

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=600&h=450&fit=crop&crop=entropy")
}

fn likert(id: &str, label: &str) -> QuestionSpec {
    QuestionSpec::likert(id, label, LIKERT_MIN, LIKERT_MAX)
}

/// The 28 questions of the natal chart wizard, in step order.
pub fn natal_chart() -> FormSpec {
    FormSpec::new(
        NATAL_CHART_ID,
        "Carta Natal",
        "1.0.0",
        natal_chart_questions(),
    )
    .expect("built-in questionnaire is well formed")
}

fn natal_chart_questions() -> Vec<QuestionSpec> {
    vec![
        QuestionSpec::text("nombre", "¿Cuál es tu nombre completo?").with_min_len(2),
        QuestionSpec::text(
            "fecha_nacimiento",
            "¿Cuál es tu fecha de nacimiento? (DD/MM/AAAA)",
        ),
        QuestionSpec::text(
            "hora_nacimiento",
            "¿A qué hora naciste? (si la sabés con precisión)",
        )
        .optional(),
        QuestionSpec::text("lugar_nacimiento", "¿En qué ciudad y país naciste?"),
        QuestionSpec::multiselect(
            "tema_interes",
            "¿Qué temas espirituales te atraen más?",
            [
                "Astrología",
                "Tarot",
                "Meditación",
                "Numerología",
                "Energía y sanación",
            ],
            Some(3),
        ),
        QuestionSpec::select(
            "lecturas",
            "¿Sueles leer sobre astrología o temas esotéricos?",
            ["Nunca", "A veces", "Con frecuencia", "Todos los días"],
        ),
        likert(
            "auto_percepcion",
            "Me siento alineado con mi propósito de vida",
        ),
        QuestionSpec::text(
            "proposito",
            "¿Qué sentís que viniste a aprender o enseñar en esta vida?",
        )
        .with_min_len(10),
        QuestionSpec::multiselect(
            "relaciones_valor",
            "¿Qué valorás más en tus relaciones?",
            [
                "Lealtad",
                "Libertad",
                "Pasión",
                "Estabilidad",
                "Crecimiento personal",
            ],
            Some(2),
        ),
        QuestionSpec::select(
            "relaciones_estado",
            "¿Actualmente estás en pareja?",
            ["Sí", "No", "Prefiero no responder"],
        ),
        QuestionSpec::text("vocacion", "¿Cuál es tu vocación o actividad principal?"),
        likert(
            "trabajo_sentido",
            "Siento que mi trabajo actual está alineado con quien soy",
        ),
        QuestionSpec::imagepick(
            "escenario_vital",
            "¿Con cuál de estas imágenes de escenarios vitales te identificás más?",
            vec![
                ImageChoice::new("astros", unsplash("photo-1500530855697-b586d89ba3ee"))
                    .with_label("Universo y astros"),
                ImageChoice::new("tarot", unsplash("photo-1606813907291-85ed9f1d32c0"))
                    .with_label("Cartas de tarot"),
                ImageChoice::new("meditacion", unsplash("photo-1525097487452-6278ff080c31"))
                    .with_label("Meditación interior"),
                ImageChoice::new("energia", unsplash("photo-1549887534-4b4b6e04f6ea"))
                    .with_label("Energía sutil"),
            ],
        ),
        QuestionSpec::multiselect(
            "emociones",
            "¿Qué emociones predominan en tu vida diaria?",
            ["Alegría", "Ansiedad", "Calma", "Curiosidad", "Pasión"],
            Some(3),
        ),
        likert(
            "gestion_emociones",
            "Considero que manejo bien mis emociones",
        ),
        QuestionSpec::select(
            "ciclos",
            "¿Sentís que tu vida se mueve en ciclos?",
            ["Sí, claramente", "A veces", "No lo noto"],
        ),
        QuestionSpec::text(
            "epoca_significativa",
            "¿Hay una etapa de tu vida que consideres clave o transformadora?",
        )
        .optional(),
        QuestionSpec::select(
            "creencias",
            "¿Te identificás con alguna tradición espiritual o religiosa?",
            ["Ninguna", "Cristianismo", "Budismo", "Hinduismo", "Otro"],
        )
        .optional(),
        likert(
            "espiritualidad",
            "Siento que la espiritualidad es parte central de mi vida",
        ),
        QuestionSpec::text("fortalezas", "¿Cuáles sentís que son tus mayores fortalezas?"),
        QuestionSpec::text(
            "desafios",
            "¿Cuáles son los desafíos más grandes que enfrentás actualmente?",
        ),
        QuestionSpec::select(
            "energia_entorno",
            "¿Dónde sentís que fluís mejor?",
            [
                "Entornos tranquilos",
                "Entornos activos",
                "En soledad",
                "En compañía",
            ],
        ),
        QuestionSpec::multiselect(
            "expresion",
            "¿Cómo te gusta expresarte más?",
            [
                "Arte",
                "Escritura",
                "Música",
                "Movimiento corporal",
                "Diálogo",
            ],
            Some(2),
        ),
        likert(
            "bienestar",
            "En general me siento en paz conmigo mismo/a",
        ),
        likert(
            "energia_personal",
            "Siento que tengo energía suficiente para mis proyectos",
        ),
        QuestionSpec::text(
            "curiosidad",
            "¿Qué tema investigarías por tu cuenta aunque nadie te lo pida?",
        ),
        QuestionSpec::text("futuro", "¿Cómo imaginás tu vida dentro de 5 años?").optional(),
        QuestionSpec::text(
            "mensaje",
            "Si pudieras dejar un mensaje para tu 'yo' futuro, ¿qué le dirías?",
        )
        .optional(),
    ]
}
