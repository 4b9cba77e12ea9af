pub mod login_rto;
