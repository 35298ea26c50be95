use super::{Command, CommandContext};
use crate::Error;
use model::channel::{CreateMessage, FollowupMessage};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt::Write;
use std::time::Duration;

const DEFAULT_CITIES: &[&str] = &["New York", "London", "Tokyo", "Sydney", "Paris"];

const LOOKUP_LATENCY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Condition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Thunderstorms,
    Snowy,
    Foggy,
    Windy,
    Clear,
}

impl Condition {
    const ALL: [Condition; 9] = [
        Condition::Sunny,
        Condition::PartlyCloudy,
        Condition::Cloudy,
        Condition::Rainy,
        Condition::Thunderstorms,
        Condition::Snowy,
        Condition::Foggy,
        Condition::Windy,
        Condition::Clear,
    ];

    fn label(self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::Rainy => "Rainy",
            Condition::Thunderstorms => "Thunderstorms",
            Condition::Snowy => "Snowy",
            Condition::Foggy => "Foggy",
            Condition::Windy => "Windy",
            Condition::Clear => "Clear",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            Condition::Sunny => "☀️",
            Condition::PartlyCloudy => "⛅",
            Condition::Cloudy => "☁️",
            Condition::Rainy => "🌧️",
            Condition::Thunderstorms => "⛈️",
            Condition::Snowy => "❄️",
            Condition::Foggy => "🌫️",
            Condition::Windy => "💨",
            Condition::Clear => "🌈",
        }
    }

    /// Inclusive lower, exclusive upper bound in °C.
    fn temperature_range(self) -> (i32, i32) {
        match self {
            Condition::Snowy => (-10, 5),
            Condition::Rainy | Condition::Foggy | Condition::Thunderstorms => (5, 15),
            Condition::Cloudy | Condition::Windy => (10, 20),
            Condition::PartlyCloudy => (15, 25),
            Condition::Sunny | Condition::Clear => (20, 35),
        }
    }
}

const TIPS: &[&str] = &[
    "Don't forget your umbrella! ☔",
    "Perfect day for outdoor activities! 🏄",
    "Stay hydrated! 💧",
    "Dress warmly! 🧣",
    "Drive safely in these conditions! 🚗",
    "UV index is high, wear sunscreen! 🧴",
];

#[derive(Debug)]
struct WeatherReport {
    city: String,
    temperature: i32,
    condition: Condition,
    humidity: u8,
    wind_speed: u8,
}

impl WeatherReport {
    fn simulate<R: Rng + ?Sized>(city: String, rng: &mut R) -> WeatherReport {
        let condition = *Condition::ALL.choose(rng).unwrap_or(&Condition::Clear);
        let (min, max) = condition.temperature_range();

        WeatherReport {
            city,
            temperature: rng.gen_range(min..max),
            condition,
            humidity: rng.gen_range(30..90),
            wind_speed: rng.gen_range(5..25),
        }
    }

    fn tip<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        match self.condition {
            Condition::Rainy | Condition::Thunderstorms => TIPS[0],
            Condition::Sunny | Condition::Clear => TIPS[1],
            _ if self.temperature > 25 => TIPS[2],
            _ if self.temperature < 10 => TIPS[3],
            Condition::Foggy | Condition::Windy => TIPS[4],
            _ => TIPS.choose(rng).copied().unwrap_or(TIPS[2]),
        }
    }

    fn format<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let emoji = self.condition.emoji();
        let mut message = String::new();

        let _ = writeln!(message, "## Weather for {} {}\n", self.city, emoji);
        let _ = writeln!(message, "**Condition:** {} {}", self.condition.label(), emoji);
        let _ = writeln!(message, "**Temperature:** {}°C", self.temperature);
        let _ = writeln!(message, "**Humidity:** {}%", self.humidity);
        let _ = writeln!(message, "**Wind Speed:** {} km/h\n", self.wind_speed);
        let _ = write!(message, "**Tip:** {}", self.tip(rng));

        message
    }
}

pub struct WeatherCommand;

impl Command for WeatherCommand {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>) -> Result<(), Error> {
        let mut rng = rand::thread_rng();

        let city = match ctx.interaction.data.string_option("city") {
            Some(city) if !city.trim().is_empty() => city.trim().to_owned(),
            _ => DEFAULT_CITIES
                .choose(&mut rng)
                .copied()
                .unwrap_or("London")
                .to_owned(),
        };

        ctx.reply(format!("🔍 Looking up weather for **{}**...", city), false)?;

        let report = WeatherReport::simulate(city, &mut rng);
        let content = report.format(&mut rng);
        let channel_id = ctx.interaction.channel_id;

        ctx.spawn(move |followups| async move {
            tokio::time::sleep(LOOKUP_LATENCY).await;

            match channel_id {
                Some(channel_id) => {
                    let message = CreateMessage {
                        content: content.into(),
                    };
                    followups
                        .requester()
                        .create_message(channel_id, &message)
                        .await?;
                }
                None => followups.send(FollowupMessage::new(content)).await?,
            }

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::run;
    use super::super::CommandRegistry;
    use super::*;
    use crate::test_util::{command_json_with_options, fresh_snowflake};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_simulated_report_is_within_ranges() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let report = WeatherReport::simulate("Oslo".to_owned(), &mut rng);
            let (min, max) = report.condition.temperature_range();

            assert!((min..max).contains(&report.temperature));
            assert!((30..90).contains(&report.humidity));
            assert!((5..25).contains(&report.wind_speed));
        }
    }

    #[test]
    fn test_format_mentions_city_and_condition() {
        let mut rng = StdRng::seed_from_u64(7);
        let report = WeatherReport {
            city: "Oslo".to_owned(),
            temperature: 12,
            condition: Condition::Rainy,
            humidity: 80,
            wind_speed: 10,
        };

        let message = report.format(&mut rng);
        assert!(message.starts_with("## Weather for Oslo 🌧️"));
        assert!(message.contains("**Temperature:** 12°C"));
        assert!(message.ends_with(TIPS[0]));
    }

    #[test]
    fn test_replies_with_requested_city() {
        let json = command_json_with_options(
            fresh_snowflake(),
            "weather",
            r#"[{"name":"city","type":3,"value":"Oslo"}]"#,
        );
        let (result, responder) = run(&CommandRegistry::default(), &json);

        assert_eq!(result.unwrap().len(), 1);
        assert_eq!(
            responder.into_response().unwrap().content(),
            Some("🔍 Looking up weather for **Oslo**...")
        );
    }
}
