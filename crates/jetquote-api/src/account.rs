// Account endpoints: newsletter subscription and auth (signup, login,
// forgot-password).
//
// Passwords stay behind `SecretString` until the request body is built.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::client::BookingClient;
use crate::error::Error;
use crate::types::{AuthResponse, ForgotPasswordRequest, MessageResponse, NewsletterRequest};

#[derive(Serialize)]
struct SignupBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl BookingClient {
    /// `POST newsletter/subscribe`
    pub async fn subscribe_newsletter(&self, email: &str) -> Result<MessageResponse, Error> {
        let body = NewsletterRequest {
            email: email.to_owned(),
        };
        self.post("newsletter/subscribe", &body).await
    }

    /// `POST auth/signup`
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, Error> {
        let body = SignupBody {
            name,
            email,
            password: password.expose_secret(),
        };
        self.post("auth/signup", &body).await
    }

    /// `POST auth/login`
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<AuthResponse, Error> {
        let body = LoginBody {
            email,
            password: password.expose_secret(),
        };
        self.post("auth/login", &body).await
    }

    /// `POST auth/forgot-password`
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, Error> {
        let body = ForgotPasswordRequest {
            email: email.to_owned(),
        };
        self.post("auth/forgot-password", &body).await
    }
}
