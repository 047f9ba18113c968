use super::*;
use crate::domain::models::SessionState;
use crate::domain::services::testing::press;
use crate::domain::services::testing::ScriptedTerminal;
use crate::domain::services::testing::Step;
use crate::domain::services::testing::TerminalCall;
use crate::domain::services::testing::Transcript;

fn terminal(steps: Vec<Step>) -> (ScriptedTerminal, Transcript) {
    return ScriptedTerminal::new(steps, &SessionState::new(false));
}

#[tokio::test]
async fn it_renders_choices_in_order() {
    let (mut term, transcript) = terminal(vec![]);
    let menu = Menu::new("Menu principal", vec!["quelques explications", "contrôle manuel"]);

    menu.display(&mut term).await.unwrap();

    assert_eq!(transcript.calls()[0], TerminalCall::ClearScreen);
    insta::assert_snapshot!(transcript.screen(), @r###"
    02:13 Menu principal
    03:13 --------------
    05:04 1 - quelques explications
    07:04 2 - contrôle manuel
    20:02 Votre choix : . + ENVOI
    "###);
}

#[tokio::test]
async fn it_shows_quit_hint_only_when_cancelable() {
    let (mut term, transcript) = terminal(vec![]);
    Menu::new("Menu", vec!["A"])
        .display(&mut term)
        .await
        .unwrap();
    assert!(!transcript.shows(QUIT_HINT));

    let (mut term, transcript) = terminal(vec![]);
    Menu::new("Menu", vec!["A"])
        .cancelable(true)
        .display(&mut term)
        .await
        .unwrap();
    assert!(transcript.calls().contains(&TerminalCall::Text {
        text: QUIT_HINT.to_string(),
        x: 13,
        y: 23
    }));
}

#[tokio::test]
async fn it_returns_validated_choice() {
    let mut steps = press("2");
    steps.push(Step::Press(Key::Envoi));
    let (mut term, _) = terminal(steps);

    let choice = Menu::new("Menu", vec!["A", "B"])
        .get_choice(&mut term)
        .await
        .unwrap();

    assert_eq!(choice, Some(2));
}

#[tokio::test]
async fn it_beeps_on_out_of_range_input() {
    let mut steps = press("3");
    steps.push(Step::Press(Key::Envoi));
    steps.extend(press("1"));
    steps.push(Step::Press(Key::Envoi));
    let (mut term, transcript) = terminal(steps);

    let choice = Menu::new("Menu", vec!["A", "B"])
        .get_choice(&mut term)
        .await
        .unwrap();

    assert_eq!(choice, Some(1));
    assert_eq!(transcript.count(&TerminalCall::Beep), 1);
}

#[tokio::test]
async fn it_supports_multi_digit_choices_and_correction() {
    let labels: Vec<String> = (1..=12).map(|i| format!("action {i}")).collect();
    let choices: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
    let steps = vec![
        Step::Press(Key::Char('1')),
        Step::Press(Key::Char('9')),
        Step::Press(Key::Correction),
        Step::Press(Key::Char('2')),
        Step::Press(Key::Char('5')),
        Step::Press(Key::Envoi),
    ];
    let (mut term, transcript) = terminal(steps);

    let choice = Menu::new("Menu", choices).get_choice(&mut term).await.unwrap();

    assert_eq!(choice, Some(12));
    // third digit does not fit in a two digit field
    assert_eq!(transcript.count(&TerminalCall::Beep), 1);
}

#[tokio::test]
async fn it_cancels_on_empty_input() {
    let (mut term, _) = terminal(vec![Step::Press(Key::Envoi)]);
    let choice = Menu::new("Menu", vec!["A"]).get_choice(&mut term).await.unwrap();
    assert_eq!(choice, None);
}

#[tokio::test]
async fn it_ignores_sommaire_unless_cancelable() {
    let mut steps = vec![Step::Press(Key::Sommaire)];
    steps.extend(press("1"));
    steps.push(Step::Press(Key::Envoi));
    let (mut term, _) = terminal(steps.clone());
    let choice = Menu::new("Menu", vec!["A"]).get_choice(&mut term).await.unwrap();
    assert_eq!(choice, Some(1));

    let (mut term, _) = terminal(steps);
    let choice = Menu::new("Menu", vec!["A"])
        .cancelable(true)
        .get_choice(&mut term)
        .await
        .unwrap();
    assert_eq!(choice, None);
}

#[tokio::test]
async fn it_propagates_interruption() {
    let (mut term, _) = terminal(vec![Step::Interrupt]);
    let res = Menu::new("Menu", vec!["A"]).get_choice(&mut term).await;
    assert!(matches!(res, Err(TerminalError::Interrupted)));
}
