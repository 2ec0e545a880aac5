use tracing::info;

use super::browser::{wait_for_element, wait_for_elements, Driver};
use super::Scraper;
use crate::error::AppError;

pub(crate) const SIGNIN_URL: &str = "https://comic-fuz.com/account/signin";

// The site generates its class names, so everything is matched by prefix.
pub(crate) const SIGNIN_INPUTS: &str = "[class^=signin_form__input]";
pub(crate) const SIGNIN_BUTTON: &str = "[class^=signin_form__button]";
pub(crate) const SIGNIN_CONFIRMATION: &str = "[class^=signin_signin__description]";

pub(crate) const LOGIN_SUCCESS_TEXT: &str = "ログインが完了しました。";

impl<D: Driver> Scraper<D> {
    /// Signs in with the given credentials. A single failed attempt fails the
    /// whole login; there is no retry.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AppError> {
        info!("Logging in");
        self.navigate(SIGNIN_URL).await?;

        let inputs = wait_for_elements(&self.driver, &self.wait, SIGNIN_INPUTS).await?;
        match inputs.len() {
            0 => return Err(AppError::ElementNotFound(SIGNIN_INPUTS.to_string())),
            2 => {}
            n => {
                return Err(AppError::Auth(format!(
                    "expected two sign-in inputs, found {n}"
                )))
            }
        }

        // Document order: email first, password second.
        inputs[0].send_keys(email).await?;
        inputs[1].send_keys(password).await?;

        wait_for_element(&self.driver, &self.wait, SIGNIN_BUTTON)
            .await?
            .click()
            .await?;

        info!("Waiting for login confirmation");
        let confirmation =
            wait_for_element(&self.driver, &self.wait, SIGNIN_CONFIRMATION).await?;
        let text = confirmation.text().await?;
        if text != LOGIN_SUCCESS_TEXT {
            return Err(AppError::Auth(format!(
                "unexpected confirmation text: {text:?}"
            )));
        }

        Ok(())
    }
}
